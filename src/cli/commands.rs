//! One-shot CLI command handlers.

use std::fmt::Write as _;
use std::path::Path;

use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use serde_json::json;

use super::args::ConfigAction;
use crate::config::{Config, Overrides};
use crate::constants;
use crate::core::error::FetchError;
use crate::core::spc::{OutlookLayer, RiskReading};
use crate::core::{http, nbm, products, spc};

/// `meso risk`: query every outlook layer once.
///
/// # Errors
///
/// Fails only when every layer failed; partial results are printed.
pub fn risk(config: &Config, json_output: bool) -> Result<()> {
    let client = http::build_client()?;
    let results: Vec<(OutlookLayer, Result<RiskReading, FetchError>)> = OutlookLayer::ALL
        .into_iter()
        .map(|layer| {
            let result = spc::fetch_risk(
                &client,
                constants::ARCGIS_BASE_URL,
                layer,
                &config.location,
            );
            (layer, result)
        })
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&risk_json(config, &results))?);
    } else {
        print!("{}", risk_table(config, &results));
    }

    if results.iter().all(|(_, r)| r.is_err()) {
        bail!("All outlook queries failed");
    }
    Ok(())
}

fn risk_json(
    config: &Config,
    results: &[(OutlookLayer, Result<RiskReading, FetchError>)],
) -> serde_json::Value {
    let mut layers = serde_json::Map::new();
    for (layer, result) in results {
        let entry = match result {
            Ok(reading) => json!({ "label": reading.label(), "none": reading.is_none() }),
            Err(e) => json!({ "error": e.to_string() }),
        };
        layers.insert(layer.common_name().to_string(), entry);
    }
    json!({
        "location": {
            "name": config.location.name,
            "latitude": config.location.latitude,
            "longitude": config.location.longitude,
        },
        "day1": layers,
    })
}

fn risk_table(
    config: &Config,
    results: &[(OutlookLayer, Result<RiskReading, FetchError>)],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "SPC Day 1 Outlook for {} ({})\n",
        config.location.name,
        config.location.coordinates()
    );
    for (layer, result) in results {
        let value = match result {
            Ok(reading) => reading.label(),
            Err(e) => format!("error: {e}"),
        };
        let _ = writeln!(out, "  {:<12} {value}", layer.title());
    }
    out
}

/// `meso daycast`: fetch the NBM bulletin once.
///
/// # Errors
///
/// Returns an error if the bulletin cannot be fetched or parsed.
pub fn daycast(config: &Config, json_output: bool) -> Result<()> {
    let client = http::build_client()?;
    let station = &config.location.station;
    let daycast = nbm::fetch_daycast(&client, constants::NBM_TEXT_URL, station)
        .wrap_err_with(|| format!("Failed to fetch daycast for {station}"))?;

    if json_output {
        let value = json!({
            "station": station,
            "high_f": daycast.high_f,
            "low_f": daycast.low_f,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Daycast for {station}");
        println!("  High  {}°F", daycast.high_f);
        println!("  Low   {}°F", daycast.low_f);
    }
    Ok(())
}

/// `meso products`
pub fn list_products() {
    print!("{}", products_table());
}

fn products_table() -> String {
    let mut out = String::new();
    for product in &products::PRODUCTS {
        let _ = writeln!(
            out,
            "  {:<12} {:<4} {}",
            product.key, product.center, product.title
        );
    }
    out
}

/// `meso open <key>`
///
/// # Errors
///
/// Returns an error for unknown keys or when no browser can be launched.
pub fn open_product(key: &str) -> Result<()> {
    let Some(product) = products::find(key) else {
        eprintln!("{}", constants::CLI_MSG_PRODUCTS_HINT);
        return Err(eyre!("{}{key}", constants::CLI_MSG_UNKNOWN_PRODUCT));
    };
    println!("{}{} ({})", constants::CLI_MSG_OPENING, product.title, product.url);
    products::open(product).wrap_err("Failed to launch browser")?;
    Ok(())
}

/// `meso config <action>`
///
/// Reads config.toml itself so `path` and `init` work even when the file is
/// broken.
///
/// # Errors
///
/// Returns an error if the config cannot be parsed, rendered or written.
pub fn run_config(action: ConfigAction, config_dir: &Path, overrides: &Overrides) -> Result<()> {
    match action {
        ConfigAction::Show => print!("{}", show_config(config_dir, overrides)?),
        ConfigAction::Path => println!("{}", Config::path(config_dir).display()),
        ConfigAction::Init => {
            let path = Config::path(config_dir);
            if path.is_file() {
                println!("{}{}", constants::CLI_MSG_CONFIG_EXISTS, path.display());
            } else {
                let written = Config::default().save(config_dir)?;
                println!("{}{}", constants::CLI_MSG_CONFIG_WRITTEN, written.display());
            }
        }
    }
    Ok(())
}

/// Effective config as TOML. Out-of-range values are reported as a trailing
/// comment instead of an error.
fn show_config(config_dir: &Path, overrides: &Overrides) -> Result<String> {
    let mut config = Config::load(config_dir)?;
    config.apply_overrides(overrides);
    let mut out = toml::to_string_pretty(&config)?;
    if let Err(e) = config.validate() {
        let _ = writeln!(out, "\n# {}{e}", constants::CLI_MSG_CONFIG_INVALID);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spc::CategoricalRisk;

    fn sample_results() -> Vec<(OutlookLayer, Result<RiskReading, FetchError>)> {
        vec![
            (
                OutlookLayer::Day1Categorical,
                Ok(RiskReading::Categorical(CategoricalRisk::Slight)),
            ),
            (OutlookLayer::Day1Tornado, Ok(RiskReading::Probability(5))),
            (OutlookLayer::Day1Wind, Ok(RiskReading::Probability(0))),
            (
                OutlookLayer::Day1Hail,
                Err(FetchError::Parse("bad".to_string())),
            ),
        ]
    }

    #[test]
    fn test_risk_table() {
        let table = risk_table(&Config::default(), &sample_results());
        assert!(table.starts_with("SPC Day 1 Outlook for Huntsville, AL"));
        assert!(table.contains("Categorical  SLGT"));
        assert!(table.contains("Tornado      5%"));
        assert!(table.contains("Wind         0%"));
        assert!(table.contains("Hail         error: bad"));
    }

    #[test]
    fn test_risk_json() {
        let value = risk_json(&Config::default(), &sample_results());
        assert_eq!(value["day1"]["categorical"]["label"], "SLGT");
        assert_eq!(value["day1"]["wind"]["none"], true);
        assert_eq!(value["day1"]["hail"]["error"], "bad");
        assert_eq!(value["location"]["name"], "Huntsville, AL");
    }

    #[test]
    fn test_products_table_lists_keys() {
        let table = products_table();
        for product in &products::PRODUCTS {
            assert!(table.contains(product.key));
        }
    }

    #[test]
    fn test_open_unknown_product() {
        let err = open_product("radar").unwrap_err();
        assert!(err.to_string().contains("Unknown product: radar"));
    }

    #[test]
    fn test_config_init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides::default();
        run_config(ConfigAction::Init, dir.path(), &overrides).unwrap();
        assert!(Config::path(dir.path()).is_file());

        std::fs::write(Config::path(dir.path()), "refresh_secs = 900\n").unwrap();
        run_config(ConfigAction::Init, dir.path(), &overrides).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().refresh_secs, 900);
    }

    #[test]
    fn test_config_path_and_init_survive_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::path(dir.path());
        std::fs::write(&path, "refresh_secs = \"soon\"\n").unwrap();
        let overrides = Overrides::default();

        run_config(ConfigAction::Path, dir.path(), &overrides).unwrap();
        run_config(ConfigAction::Init, dir.path(), &overrides).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "refresh_secs = \"soon\"\n"
        );

        let err = run_config(ConfigAction::Show, dir.path(), &overrides).unwrap_err();
        assert!(err.to_string().contains("Invalid config at"));
    }

    #[test]
    fn test_config_show_reports_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::path(dir.path()), "refresh_secs = 10\n").unwrap();

        let shown = show_config(dir.path(), &Overrides::default()).unwrap();
        assert!(shown.contains("refresh_secs = 10"));
        assert!(shown.contains("# Invalid: refresh_secs must be at least 60"));
        run_config(ConfigAction::Show, dir.path(), &Overrides::default()).unwrap();
    }

    #[test]
    fn test_config_show_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            station: Some("kbmx".to_string()),
            ..Overrides::default()
        };
        let shown = show_config(dir.path(), &overrides).unwrap();
        assert!(shown.contains("station = \"KBMX\""));
        assert!(!shown.contains("# Invalid"));
    }
}
