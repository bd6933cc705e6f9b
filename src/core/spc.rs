//! SPC Day 1 convective outlook lookups.
//!
//! The outlook polygons are served by the NOAA ArcGIS map service. A point
//! query against one layer returns every polygon containing the point; the
//! polygons are nested (a SLGT area lies inside MRGL, which lies inside
//! TSTM), so the reading at the point is the largest `dn` returned.

use std::cmp::Ordering;
use std::fmt;

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use super::error::{FetchError, Result};
use super::http;
use crate::config::Location;

/// Map service layers queried by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlookLayer {
    Day1Categorical,
    Day1Tornado,
    Day1Hail,
    Day1Wind,
}

impl OutlookLayer {
    /// Every layer, in display order.
    pub const ALL: [Self; 4] = [
        Self::Day1Categorical,
        Self::Day1Tornado,
        Self::Day1Wind,
        Self::Day1Hail,
    ];

    /// Layer id inside the `SPC_wx_outlks` map service.
    #[must_use]
    pub const fn layer_id(self) -> u8 {
        match self {
            Self::Day1Categorical => 1,
            Self::Day1Tornado => 3,
            Self::Day1Hail => 5,
            Self::Day1Wind => 7,
        }
    }

    /// Lowercase name, also used as the product key of the matching map.
    #[must_use]
    pub const fn common_name(self) -> &'static str {
        match self {
            Self::Day1Categorical => "categorical",
            Self::Day1Tornado => "tornado",
            Self::Day1Hail => "hail",
            Self::Day1Wind => "wind",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Day1Categorical => "Categorical",
            Self::Day1Tornado => "Tornado",
            Self::Day1Hail => "Hail",
            Self::Day1Wind => "Wind",
        }
    }

    #[must_use]
    pub const fn is_probabilistic(self) -> bool {
        !matches!(self, Self::Day1Categorical)
    }

    /// Interprets a raw `dn` value for this layer.
    #[must_use]
    pub fn reading(self, dn: u32) -> RiskReading {
        if self.is_probabilistic() {
            RiskReading::Probability(u8::try_from(dn.min(100)).unwrap_or(100))
        } else {
            RiskReading::Categorical(CategoricalRisk::from_dn(dn))
        }
    }
}

impl fmt::Display for OutlookLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// SPC categorical outlook levels, ordered by severity.
///
/// Unrecognized codes sort below [`CategoricalRisk::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalRisk {
    None,
    /// General thunderstorms.
    Thunder,
    Marginal,
    Slight,
    Enhanced,
    Moderate,
    High,
    /// A code this build does not know about.
    Other(u32),
}

impl CategoricalRisk {
    #[must_use]
    pub const fn from_dn(dn: u32) -> Self {
        match dn {
            0 => Self::None,
            2 => Self::Thunder,
            3 => Self::Marginal,
            4 => Self::Slight,
            5 => Self::Enhanced,
            6 => Self::Moderate,
            8 => Self::High,
            other => Self::Other(other),
        }
    }

    /// SPC abbreviation, e.g. `SLGT`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::None => "NONE".to_string(),
            Self::Thunder => "TSTM".to_string(),
            Self::Marginal => "MRGL".to_string(),
            Self::Slight => "SLGT".to_string(),
            Self::Enhanced => "ENH".to_string(),
            Self::Moderate => "MDT".to_string(),
            Self::High => "HIGH".to_string(),
            Self::Other(dn) => format!("DN{dn}"),
        }
    }

    /// Severity rank used for ordering.
    const fn rank(self) -> (u8, u32) {
        match self {
            Self::Other(dn) => (0, dn),
            Self::None => (1, 0),
            Self::Thunder => (2, 0),
            Self::Marginal => (3, 0),
            Self::Slight => (4, 0),
            Self::Enhanced => (5, 0),
            Self::Moderate => (6, 0),
            Self::High => (7, 0),
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::None => "No severe thunderstorms expected",
            Self::Thunder => "General thunderstorms",
            Self::Marginal => "Marginal risk: isolated severe storms possible",
            Self::Slight => "Slight risk: scattered severe storms possible",
            Self::Enhanced => "Enhanced risk: numerous severe storms possible",
            Self::Moderate => "Moderate risk: widespread severe storms likely",
            Self::High => "High risk: widespread severe storms expected",
            Self::Other(_) => "Unrecognized outlook category",
        }
    }
}

impl Ord for CategoricalRisk {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for CategoricalRisk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Value of one layer at the configured point.
///
/// Readings of the same kind compare by severity; a categorical reading and
/// a probability are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskReading {
    Categorical(CategoricalRisk),
    /// Probability of the hazard within 25 miles, in percent.
    Probability(u8),
}

impl RiskReading {
    /// Short display label: `NONE`, `SLGT`, `0%`, `15%`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Categorical(risk) => risk.label(),
            Self::Probability(p) => format!("{p}%"),
        }
    }

    /// Whether any risk is present at all.
    #[must_use]
    pub fn is_none(self) -> bool {
        matches!(
            self,
            Self::Categorical(CategoricalRisk::None) | Self::Probability(0)
        )
    }
}

impl PartialOrd for RiskReading {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Categorical(a), Self::Categorical(b)) => Some(a.cmp(b)),
            (Self::Probability(a), Self::Probability(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for RiskReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<Feature>,
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct Feature {
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct Attributes {
    dn: Option<i64>,
}

/// Builds the point query URL for `layer` at `location`.
///
/// # Errors
///
/// Returns an error if `base` is not a valid URL.
pub fn query_url(base: &str, layer: OutlookLayer, location: &Location) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/{}/query",
        base.trim_end_matches('/'),
        layer.layer_id()
    ))?;
    url.query_pairs_mut()
        .append_pair("f", "json")
        .append_pair(
            "geometry",
            &format!("{},{}", location.longitude, location.latitude),
        )
        .append_pair("geometryType", "esriGeometryPoint")
        .append_pair("inSR", "4326")
        .append_pair("spatialRel", "esriSpatialRelIntersects")
        .append_pair("outFields", "*")
        .append_pair("returnGeometry", "false");
    Ok(url)
}

/// Extracts the highest `dn` from a query response; 0 when nothing intersects.
///
/// # Errors
///
/// Returns [`FetchError::Service`] when the service embeds an error object
/// and [`FetchError::Json`] when the body is not a query response.
pub fn parse_response(body: &str) -> Result<u32> {
    let response: QueryResponse = serde_json::from_str(body)?;

    if let Some(err) = response.error {
        return Err(FetchError::Service {
            code: err.code,
            message: err.message,
        });
    }

    Ok(response
        .features
        .iter()
        .filter_map(|f| f.attributes.dn)
        .filter_map(|dn| u32::try_from(dn).ok())
        .max()
        .unwrap_or(0))
}

/// Queries one outlook layer at `location`.
///
/// # Errors
///
/// Propagates transport, status and parse failures after retries.
pub fn fetch_risk(
    client: &Client,
    base: &str,
    layer: OutlookLayer,
    location: &Location,
) -> Result<RiskReading> {
    let url = query_url(base, layer, location)?;
    let dn = http::with_retry(layer.common_name(), || {
        let body = http::get_text(client, &url)?;
        parse_response(&body)
    })?;
    tracing::info!(layer = layer.common_name(), dn, "outlook layer fetched");
    Ok(layer.reading(dn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_ids() {
        assert_eq!(OutlookLayer::Day1Categorical.layer_id(), 1);
        assert_eq!(OutlookLayer::Day1Tornado.layer_id(), 3);
        assert_eq!(OutlookLayer::Day1Hail.layer_id(), 5);
        assert_eq!(OutlookLayer::Day1Wind.layer_id(), 7);
    }

    #[test]
    fn test_query_url_contains_point() {
        let url = query_url(
            "https://example.test/MapServer/",
            OutlookLayer::Day1Tornado,
            &Location::default(),
        )
        .unwrap();
        assert_eq!(url.path(), "/MapServer/3/query");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("geometry".into(), "-86.6018,34.7382".into())));
        assert!(pairs.contains(&("inSR".into(), "4326".into())));
        assert!(pairs.contains(&("f".into(), "json".into())));
    }

    #[test]
    fn test_parse_no_features_is_zero() {
        let body = r#"{"displayFieldName":"dn","features":[]}"#;
        assert_eq!(parse_response(body).unwrap(), 0);
    }

    #[test]
    fn test_parse_takes_max_of_nested_polygons() {
        let body = r#"{
            "features": [
                {"attributes": {"dn": 2, "label": "TSTM"}},
                {"attributes": {"dn": 4, "label": "SLGT"}},
                {"attributes": {"dn": 3, "label": "MRGL"}}
            ]
        }"#;
        assert_eq!(parse_response(body).unwrap(), 4);
    }

    #[test]
    fn test_parse_ignores_null_dn() {
        let body = r#"{"features": [{"attributes": {"dn": null}}, {"attributes": {"dn": 5}}]}"#;
        assert_eq!(parse_response(body).unwrap(), 5);
    }

    #[test]
    fn test_parse_service_error() {
        let body = r#"{"error": {"code": 400, "message": "Unable to complete operation.", "details": []}}"#;
        match parse_response(body) {
            Err(FetchError::Service { code, message }) => {
                assert_eq!(code, 400);
                assert_eq!(message, "Unable to complete operation.");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_garbage_is_json_error() {
        assert!(matches!(
            parse_response("<html>maintenance</html>"),
            Err(FetchError::Json(_))
        ));
    }

    #[test]
    fn test_categorical_codes() {
        assert_eq!(CategoricalRisk::from_dn(0), CategoricalRisk::None);
        assert_eq!(CategoricalRisk::from_dn(2), CategoricalRisk::Thunder);
        assert_eq!(CategoricalRisk::from_dn(5), CategoricalRisk::Enhanced);
        assert_eq!(CategoricalRisk::from_dn(8), CategoricalRisk::High);
        assert_eq!(CategoricalRisk::from_dn(7), CategoricalRisk::Other(7));
        assert!(CategoricalRisk::Moderate > CategoricalRisk::Slight);
    }

    #[test]
    fn test_reading_labels() {
        assert_eq!(OutlookLayer::Day1Categorical.reading(0).label(), "NONE");
        assert_eq!(OutlookLayer::Day1Categorical.reading(4).label(), "SLGT");
        assert_eq!(OutlookLayer::Day1Tornado.reading(0).label(), "0%");
        assert_eq!(OutlookLayer::Day1Hail.reading(15).label(), "15%");
        assert!(OutlookLayer::Day1Wind.reading(0).is_none());
        assert!(!OutlookLayer::Day1Wind.reading(5).is_none());
    }

    #[test]
    fn test_categorical_severity_order() {
        let ladder = [2, 3, 4, 5, 6, 8].map(CategoricalRisk::from_dn);
        assert!(ladder.windows(2).all(|w| w[0] < w[1]));
        assert!(CategoricalRisk::None < CategoricalRisk::Thunder);
        assert!(CategoricalRisk::Other(1) < CategoricalRisk::None);
        assert!(CategoricalRisk::Other(9) < CategoricalRisk::High);
        assert!(CategoricalRisk::Other(1) < CategoricalRisk::Other(7));
        assert_eq!(
            [2, 8, 0, 4].map(CategoricalRisk::from_dn).into_iter().max(),
            Some(CategoricalRisk::High)
        );
    }

    #[test]
    fn test_reading_order() {
        let slight = RiskReading::Categorical(CategoricalRisk::Slight);
        let moderate = RiskReading::Categorical(CategoricalRisk::Moderate);
        assert!(slight < moderate);
        assert!(RiskReading::Probability(5) < RiskReading::Probability(30));
        assert!(RiskReading::Probability(0) < RiskReading::Probability(2));
        assert_eq!(slight.partial_cmp(&RiskReading::Probability(5)), None);
        assert_eq!(RiskReading::Probability(5).partial_cmp(&moderate), None);
    }
}
