//! Blocking HTTP client shared by the feed fetchers.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use super::error::{FetchError, Result};
use crate::constants;

/// Builds the HTTP client used for every feed request.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(constants::HTTP_TIMEOUT_SECS))
        .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION))
        .build()?;
    Ok(client)
}

/// Fetches `url` and returns the body as text.
///
/// # Errors
///
/// Returns [`FetchError::Status`] for non-2xx responses and
/// [`FetchError::EmptyBody`] when the server sends nothing.
pub fn get_text(client: &Client, url: &Url) -> Result<String> {
    tracing::debug!(%url, "GET");
    let response = client.get(url.as_str()).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let body = response.text()?;
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }
    Ok(body)
}

/// Runs `op` up to [`constants::RETRY_ATTEMPTS`] times, doubling the delay
/// after each retryable failure.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-retryable error immediately.
pub fn with_retry<T>(what: &str, mut op: impl FnMut() -> Result<T>) -> Result<T> {
    with_retry_delay(
        what,
        constants::RETRY_ATTEMPTS,
        Duration::from_millis(constants::RETRY_DELAY_MS),
        &mut op,
    )
}

fn with_retry_delay<T>(
    what: &str,
    attempts: u8,
    initial_delay: Duration,
    op: &mut impl FnMut() -> Result<T>,
) -> Result<T> {
    let mut delay = initial_delay;
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < attempts => {
                tracing::warn!(attempt, error = %e, "{what} failed, retrying in {delay:?}");
                thread::sleep(delay);
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
