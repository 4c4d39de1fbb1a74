//! Shared HTTP plumbing for provider adapters

use council_application::ProviderError;
use reqwest::{Client, Response};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a client whose own request timeout is `request_timeout`.
///
/// The council applies its per-class timeout on top; this only stops a
/// stalled socket from outliving the process.
pub(crate) fn client(request_timeout: Duration) -> Client {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Map a transport error onto the port's error type
pub(crate) fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else if err.is_connect() || err.is_request() {
        ProviderError::Connection(err.to_string())
    } else if err.is_decode() || err.is_body() {
        ProviderError::InvalidResponse(err.to_string())
    } else {
        ProviderError::Other(err.to_string())
    }
}

/// Reject non-2xx responses, keeping the body for diagnostics
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Http {
        status: status.as_u16(),
        body,
    })
}

/// Strip trailing `/` so paths can be appended with `format!`
pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
