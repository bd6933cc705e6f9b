//! Application-wide constants and configuration values.
//!
//! This module defines all static configuration values used throughout Meso,
//! including timing intervals, feed endpoints, file paths, and UI messages.

use std::time::Duration;

// === Application Metadata ===

/// Application name and title (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Short technical summary of the application (from Cargo.toml).
pub const APP_SUMMARY: &str = env!("CARGO_PKG_DESCRIPTION");

// === Timing Configuration ===

/// UI refresh rate in milliseconds.
pub const DEFAULT_TICK_RATE: u64 = 1000;
/// Smallest tick rate accepted from config.
pub const MIN_TICK_RATE: u64 = 50;
/// Interval between feed refresh cycles, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 300;
/// Smallest refresh interval accepted from config. SPC and NBM products
/// update at most a few times per hour.
pub const MIN_REFRESH_SECS: u64 = 60;
/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
/// Maximum number of entries kept in the in-app activity log.
pub const MAX_LOG_ENTRIES: usize = 200;

// === Path Configuration ===

/// Name of the config directory under the platform config root.
pub const CONFIG_DIR_NAME: &str = "meso";
/// Name of the config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Name of the logs subdirectory.
pub const LOGS_DIR_NAME: &str = "logs";
/// Name of the log file inside the logs directory.
pub const LOG_FILE_NAME: &str = "meso.log";
/// Log filter used when neither `MESO_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Environment variable that overrides the log filter.
pub const LOG_ENV_VAR: &str = "MESO_LOG";

// === Default Location (Huntsville, AL) ===

pub const DEFAULT_LOCATION_NAME: &str = "Huntsville, AL";
pub const DEFAULT_LATITUDE: f64 = 34.7382;
pub const DEFAULT_LONGITUDE: f64 = -86.6018;
pub const DEFAULT_STATION: &str = "KHSV";

// === Feed Endpoints ===

/// SPC outlook map service (ArcGIS REST).
pub const ARCGIS_BASE_URL: &str =
    "https://mapservices.weather.noaa.gov/vector/rest/services/outlooks/SPC_wx_outlks/MapServer";
/// National Blend of Models text bulletin endpoint.
pub const NBM_TEXT_URL: &str = "https://blend.mdl.nws.noaa.gov/nbm-text-new";
/// NBM bulletin element (short-range NBS).
pub const NBM_ELEMENT: &str = "NBS";
/// NBM cycle selector.
pub const NBM_CYCLE: &str = "Latest";
/// Row marker for min/max temperature in the NBM bulletin.
pub const NBM_TEMP_ROW: &str = "TXN";

/// Timeout for HTTP calls in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// Initial delay between retry attempts in milliseconds (doubled per attempt).
pub const RETRY_DELAY_MS: u64 = 500;
/// Number of attempts per fetch.
pub const RETRY_ATTEMPTS: u8 = 3;

// === UI Messages ===

/// Initialization message template.
pub const MSG_INIT: &str = "INIT: {} v{} starting...";
/// Ready state message.
pub const MSG_READY: &str = "SUCCESS: Dashboard active. Press [x] for actions.";
/// Refresh requested by the user.
pub const MSG_REFRESHING: &str = "Refreshing feeds...";
/// Data fetching placeholder.
pub const MSG_FETCHING: &str = "Fetching...";
/// No data available placeholder.
pub const MSG_NO_DATA: &str = "---";
/// Prefix for opened product toasts.
pub const MSG_OPENED: &str = "Opened ";
/// Prefix for failed browser launches.
pub const MSG_OPEN_FAILED: &str = "Could not open browser: ";

// === UI Labels & Titles ===

pub const TITLE_DAYCAST: &str = " Daycast ";
pub const TITLE_CATEGORICAL: &str = " Day 1 Categorical Outlook ";
pub const TITLE_RISKS: &str = " Risks by Type ";
pub const TITLE_PRODUCTS: &str = " Products ";
pub const TITLE_ACTIVITY: &str = " Activity ";
pub const TITLE_ACTIONS: &str = "Actions";

// === Messages: CLI Output ===

pub const CLI_MSG_CONFIG_WRITTEN: &str = "Wrote default config to ";
pub const CLI_MSG_CONFIG_EXISTS: &str = "Config already exists at ";
pub const CLI_MSG_CONFIG_INVALID: &str = "Invalid: ";
pub const CLI_MSG_OPENING: &str = "Opening ";
pub const CLI_MSG_UNKNOWN_PRODUCT: &str = "Unknown product: ";
pub const CLI_MSG_PRODUCTS_HINT: &str = "Run 'meso products' to list available keys.";
