//! National Blend of Models text bulletin (NBS) parsing.

use reqwest::blocking::Client;
use url::Url;

use super::error::{FetchError, Result};
use super::http;
use crate::constants;

/// Forecast high and low temperature for the station, in °F.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Daycast {
    pub high_f: i32,
    pub low_f: i32,
}

/// Builds the bulletin URL for `station`.
///
/// # Errors
///
/// Returns an error if `base` is not a valid URL.
pub fn bulletin_url(base: &str, station: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("ele", constants::NBM_ELEMENT)
        .append_pair("sta", station)
        .append_pair("cyc", constants::NBM_CYCLE);
    Ok(url)
}

/// Finds the first `TXN` row and reads the low then the high from it.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] when no row carries two integer values.
pub fn parse_temperatures(text: &str) -> Result<Daycast> {
    let row = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .find(|tokens| tokens.first() == Some(&constants::NBM_TEMP_ROW))
        .ok_or_else(|| FetchError::Parse("temperatures not found".to_string()))?;

    let value = |idx: usize| row.get(idx).and_then(|t| t.parse::<i32>().ok());

    match (value(1), value(2)) {
        (Some(low_f), Some(high_f)) => Ok(Daycast { high_f, low_f }),
        _ => Err(FetchError::Parse(format!(
            "malformed {} row: {}",
            constants::NBM_TEMP_ROW,
            row.join(" ")
        ))),
    }
}

/// Downloads and parses the latest bulletin for `station`.
///
/// # Errors
///
/// Propagates transport, status and parse failures after retries.
pub fn fetch_daycast(client: &Client, base: &str, station: &str) -> Result<Daycast> {
    let url = bulletin_url(base, station)?;
    let daycast = http::with_retry("daycast", || {
        let body = http::get_text(client, &url)?;
        parse_temperatures(&body)
    })?;
    tracing::info!(
        station,
        high = daycast.high_f,
        low = daycast.low_f,
        "daycast fetched"
    );
    Ok(daycast)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULLETIN: &str = "\
 KHSV    NBM V4.2 NBS GUIDANCE    10/19/2026  1200 UTC
 DT /OCT  19/OCT  20                /OCT  21
 UTC  18 21 00 03 06 09 12 15 18 21 00 03 06 09 12
 FHR  06 09 12 15 18 21 24 27 30 33 36 39 42 45 48
 TXN        54          79          57          83
 XND         2           2           2           2
 TMP  74 78 72 64 60 57 55 66 77 79 70 63 60 58 58
";

    #[test]
    fn test_parse_first_txn_row() {
        let daycast = parse_temperatures(BULLETIN).unwrap();
        assert_eq!(daycast, Daycast { high_f: 79, low_f: 54 });
    }

    #[test]
    fn test_parse_negative_values() {
        let text = "TXN  -12  5\n";
        let daycast = parse_temperatures(text).unwrap();
        assert_eq!(daycast.low_f, -12);
        assert_eq!(daycast.high_f, 5);
    }

    #[test]
    fn test_missing_row() {
        let err = parse_temperatures("TMP 70 71 72\nXND 2 2").unwrap_err();
        assert_eq!(err.to_string(), "temperatures not found");
    }

    #[test]
    fn test_short_row() {
        let err = parse_temperatures(" TXN  54\n").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(err.to_string().contains("malformed TXN row"));
    }

    #[test]
    fn test_txn_must_be_first_token() {
        assert!(parse_temperatures("NOTE TXN 1 2").is_err());
    }

    #[test]
    fn test_bulletin_url() {
        let url = bulletin_url(constants::NBM_TEXT_URL, "KHSV").unwrap();
        assert_eq!(
            url.as_str(),
            "https://blend.mdl.nws.noaa.gov/nbm-text-new?ele=NBS&sta=KHSV&cyc=Latest"
        );
    }
}
