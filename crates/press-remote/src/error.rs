//! Remote store error types.

use thiserror::Error;

/// Result type for remote store operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Errors that can occur when talking to the remote content store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error: store unreachable, connection reset, or a
    /// response body that could not be decoded.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error message or response body.
        message: String,
    },
}

impl RemoteError {
    /// The HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Transport(e) => e.status().map(|s| s.as_u16()),
            RemoteError::Api { status, .. } => Some(*status),
        }
    }
}
