//! Shared HTTP plumbing for remote lookup clients.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::warn;

use crate::domain::errors::LookupError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent sent to hosting services.
pub const DEFAULT_USER_AGENT: &str = concat!("picfetch/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by every lookup client.
///
/// # Errors
/// Returns error if the client cannot be created.
pub fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, LookupError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .map_err(|e| LookupError::unavailable(format!("failed to create HTTP client: {e}")))
}

/// Maps a reqwest transport failure.
#[must_use]
pub fn transport_error(error: &reqwest::Error) -> LookupError {
    warn!(error = %error, "Request to hosting service failed");
    if error.is_timeout() {
        LookupError::unavailable("request timed out")
    } else if error.is_connect() {
        LookupError::unavailable("failed to connect")
    } else {
        LookupError::unavailable(error.to_string())
    }
}

/// Classifies a response status that settles the lookup without a body.
///
/// Returns `None` when the body should be inspected.
#[must_use]
pub fn classify_status(status: StatusCode) -> Option<LookupError> {
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => Some(LookupError::NotFound),
        StatusCode::TOO_MANY_REQUESTS => Some(LookupError::unavailable("rate limited")),
        s if s.is_server_error() => Some(LookupError::unavailable(format!("HTTP {s}"))),
        _ => None,
    }
}

/// Fetches a URL as text, applying [`classify_status`].
///
/// # Errors
/// Returns error on transport failure or a settling status code.
pub async fn get_text(client: &Client, url: &str) -> Result<(StatusCode, String), LookupError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(&e))?;

    let status = response.status();
    if let Some(error) = classify_status(status) {
        return Err(error);
    }

    let body = response.text().await.map_err(|e| transport_error(&e))?;
    Ok((status, body))
}
