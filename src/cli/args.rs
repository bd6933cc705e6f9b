//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::config::Overrides;

/// Meso - SPC outlooks and NWS forecasts in your terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding config.toml and logs
    #[arg(long, global = true, env = "MESO_CONFIG_DIR")]
    pub config_dir: Option<String>,

    /// Latitude in decimal degrees (overrides config)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (overrides config)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// NBM station identifier, e.g. KHSV (overrides config)
    #[arg(long, global = true)]
    pub station: Option<String>,

    /// Subcommand to execute (defaults to the dashboard)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            latitude: self.lat,
            longitude: self.lon,
            station: self.station.clone(),
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the SPC Day 1 outlook at the configured location
    Risk {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print today's NBM high and low for the configured station
    Daycast {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List image products that can be opened
    Products,
    /// Open an image product in the browser
    Open {
        /// Product key, as shown by `meso products`
        product: String,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config.toml if none exists
    Init,
    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_dashboard() {
        let args = Args::try_parse_from(["meso"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_negative_longitude_and_global_flags() {
        let args =
            Args::try_parse_from(["meso", "risk", "--json", "--lat", "35.2", "--lon", "-97.4"])
                .unwrap();
        assert!(matches!(args.command, Some(Commands::Risk { json: true })));
        let overrides = args.overrides();
        assert_eq!(overrides.latitude, Some(35.2));
        assert_eq!(overrides.longitude, Some(-97.4));
    }

    #[test]
    fn test_config_subcommands() {
        let args = Args::try_parse_from(["meso", "config", "init"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_open_requires_product() {
        assert!(Args::try_parse_from(["meso", "open"]).is_err());
    }
}
