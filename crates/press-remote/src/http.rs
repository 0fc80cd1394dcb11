//! Shared HTTP response helpers.
//!
//! Centralizes the status-code check (non-success → [`RemoteError::Api`]) so
//! the client stays focused on request construction and response mapping.

use crate::error::RemoteError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on 2xx. Any other status is mapped to
/// [`RemoteError::Api`] with the status code and response body. There is no
/// retry or rate-limit handling anywhere in this tool; a failed request is
/// reported and retried on the next manual run.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if !resp.status().is_success() {
        return Err(RemoteError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
