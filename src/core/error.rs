//! Error types for feed fetching and parsing.

use thiserror::Error;

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching or parsing a weather feed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server returned error: {0}")]
    Status(reqwest::StatusCode),

    /// Server answered 2xx with nothing in the body.
    #[error("Response body is empty")]
    EmptyBody,

    /// The ArcGIS service reported an error inside a 200 response.
    #[error("Map service error {code}: {message}")]
    Service { code: i64, message: String },

    /// Response body did not match the expected JSON shape.
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response was readable but lacked the expected data.
    #[error("{0}")]
    Parse(String),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Transport failures and server-side (5xx) or throttling (429) statuses
    /// are retried. Anything that depends on the content of a response is
    /// not, including errors the map service embeds in a 200 body.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::EmptyBody => true,
            Self::Status(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            Self::Service { .. } | Self::Json(_) | Self::Parse(_) | Self::Url(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(FetchError::Status(StatusCode::SERVICE_UNAVAILABLE).is_retryable());
        assert!(FetchError::Status(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(FetchError::Status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!FetchError::Status(StatusCode::NOT_FOUND).is_retryable());
        assert!(!FetchError::Status(StatusCode::BAD_REQUEST).is_retryable());
    }

    #[test]
    fn test_parse_errors_are_not_retryable() {
        assert!(!FetchError::Parse("temperatures not found".into()).is_retryable());
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!FetchError::Json(json_err).is_retryable());
    }

    #[test]
    fn test_service_error_classification() {
        let busy = FetchError::Service {
            code: 503,
            message: "busy".into(),
        };
        let bad = FetchError::Service {
            code: 400,
            message: "Invalid geometry".into(),
        };
        assert!(!busy.is_retryable());
        assert!(!bad.is_retryable());
        assert_eq!(bad.to_string(), "Map service error 400: Invalid geometry");
    }
}
