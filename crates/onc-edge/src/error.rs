//! Edge service error types.

use thiserror::Error;

/// Errors that can occur when talking to the edge vitals service.
#[derive(Debug, Error)]
pub enum EdgeError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The bearer token was rejected by the edge service.
    #[error("edge service rejected the session token — run `onc auth login`")]
    Unauthorized,

    /// The edge service returned a non-success status code.
    #[error("edge service error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the edge service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse an edge service response.
    #[error("parse error: {0}")]
    Parse(String),
}
