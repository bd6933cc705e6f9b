//! User configuration persisted as `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is valid.
//! Command-line flags are applied on top with [`Config::apply_overrides`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Errors raised while loading, saving or validating the config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Point of interest the dashboard reports on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Display name shown in the header.
    pub name: String,
    /// Decimal degrees, north positive.
    pub latitude: f64,
    /// Decimal degrees, east positive.
    pub longitude: f64,
    /// ICAO identifier of the NBM station used for the daycast.
    pub station: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_LOCATION_NAME.to_string(),
            latitude: constants::DEFAULT_LATITUDE,
            longitude: constants::DEFAULT_LONGITUDE,
            station: constants::DEFAULT_STATION.to_string(),
        }
    }
}

impl Location {
    /// Coordinates formatted for display, e.g. `34.7382°N 86.6018°W`.
    #[must_use]
    pub fn coordinates(&self) -> String {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.4}°{ns} {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between feed refresh cycles.
    pub refresh_secs: u64,
    /// Milliseconds between UI ticks.
    pub tick_rate_ms: u64,
    /// Default tracing filter when `MESO_LOG` is unset.
    pub log_level: String,
    pub location: Location,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_secs: constants::DEFAULT_REFRESH_SECS,
            tick_rate_ms: constants::DEFAULT_TICK_RATE,
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
            location: Location::default(),
        }
    }
}

/// Values from the command line that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub station: Option<String>,
}

impl Config {
    /// Path of the config file inside `dir`.
    #[must_use]
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(constants::CONFIG_FILE_NAME)
    }

    /// Loads `config.toml` from `dir`, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(dir);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Writes the config to `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ConfigError> {
        let path = Self::path(dir);
        let content = toml::to_string_pretty(self)?;
        fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, content).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Applies command-line overrides in place.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(lat) = overrides.latitude {
            self.location.latitude = lat;
        }
        if let Some(lon) = overrides.longitude {
            self.location.longitude = lon;
        }
        if let Some(ref station) = overrides.station {
            self.location.station = station.to_uppercase();
        }
        if overrides.latitude.is_some() || overrides.longitude.is_some() {
            self.location.name = self.location.coordinates();
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let loc = &self.location;
        if !(-90.0..=90.0).contains(&loc.latitude) {
            return Err(ConfigError::Invalid(format!(
                "latitude {} is outside -90..=90",
                loc.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&loc.longitude) {
            return Err(ConfigError::Invalid(format!(
                "longitude {} is outside -180..=180",
                loc.longitude
            )));
        }
        if loc.station.is_empty() || !loc.station.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Invalid(format!(
                "station '{}' must be a non-empty alphanumeric identifier",
                loc.station
            )));
        }
        if self.refresh_secs < constants::MIN_REFRESH_SECS {
            return Err(ConfigError::Invalid(format!(
                "refresh_secs must be at least {}",
                constants::MIN_REFRESH_SECS
            )));
        }
        if self.tick_rate_ms < constants::MIN_TICK_RATE {
            return Err(ConfigError::Invalid(format!(
                "tick_rate_ms must be at least {}",
                constants::MIN_TICK_RATE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.location.station, "KHSV");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let mut config = Config::default();
        config.location.name = "Norman, OK".to_string();
        config.location.latitude = 35.2226;
        config.location.longitude = -97.4395;
        config.location.station = "KOUN".to_string();

        let path = config.save(&nested).unwrap();
        assert!(path.ends_with("config.toml"));
        assert_eq!(Config::load(&nested).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "refresh_secs = 600\n\n[location]\nstation = \"KBMX\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.refresh_secs, 600);
        assert_eq!(config.location.station, "KBMX");
        assert!((config.location.latitude - constants::DEFAULT_LATITUDE).abs() < f64::EPSILON);
        assert_eq!(config.tick_rate_ms, constants::DEFAULT_TICK_RATE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "refresh_secs = \"soon\"").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_coordinates() {
        let mut config = Config::default();
        config.location.latitude = 91.0;
        assert!(config.validate().unwrap_err().to_string().contains("latitude"));

        let mut config = Config::default();
        config.location.longitude = -181.0;
        assert!(config.validate().unwrap_err().to_string().contains("longitude"));
    }

    #[test]
    fn test_validate_rejects_bad_station_and_intervals() {
        let mut config = Config::default();
        config.location.station = "K HSV".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.refresh_secs = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tick_rate_ms = 1;
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides {
            latitude: Some(35.0),
            longitude: Some(-97.5),
            station: Some("koun".to_string()),
        });
        assert!((config.location.latitude - 35.0).abs() < f64::EPSILON);
        assert!((config.location.longitude + 97.5).abs() < f64::EPSILON);
        assert_eq!(config.location.station, "KOUN");
        assert_eq!(config.location.name, "35.0000°N 97.5000°W");
    }

    #[test]
    fn test_station_override_keeps_name() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides {
            station: Some("KMSL".to_string()),
            ..Overrides::default()
        });
        assert_eq!(config.location.name, constants::DEFAULT_LOCATION_NAME);
    }

    #[test]
    fn test_coordinates_format() {
        let loc = Location::default();
        assert_eq!(loc.coordinates(), "34.7382°N 86.6018°W");
    }
}
