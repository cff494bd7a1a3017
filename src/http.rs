//! Shared HTTP client construction for provider requests.
//!
//! Two client flavours: a short-timeout probe client for connectivity
//! checks, and an untimed client for generation calls, where a slow model
//! may legitimately take minutes to answer.

use crate::error::ChatError;
use std::time::Duration;

/// Timeout applied to connectivity probes and model listing.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the client used for connectivity probes and model listing.
///
/// # Errors
///
/// Returns [`ChatError::Http`] if the client cannot be constructed.
pub(crate) fn probe_client() -> Result<reqwest::Client, ChatError> {
    reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(|e| ChatError::Http(format!("failed to build HTTP client: {e}")))
}

/// Build the client used for generation calls. No request timeout is set;
/// generation is bounded only by the transport.
///
/// # Errors
///
/// Returns [`ChatError::Http`] if the client cannot be constructed.
pub(crate) fn generation_client() -> Result<reqwest::Client, ChatError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| ChatError::Http(format!("failed to build HTTP client: {e}")))
}

/// Turn a non-2xx response into [`ChatError::Api`], consuming the body
/// (truncated) as the message.
pub(crate) async fn api_error(response: reqwest::Response) -> ChatError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.chars().take(500).collect()
    };
    ChatError::Api { status, message }
}
