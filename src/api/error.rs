//! Error types for upstream API calls.
//!
//! Statuses below 500 are not errors at this layer: the caller receives the
//! status and body and decides what to surface. Only transport-level
//! failures and 5xx responses are raised.

use thiserror::Error;

/// Result type for upstream API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request exceeded the fixed deadline.
    #[error("request to the mockup API timed out")]
    Timeout,

    /// The connection could not be established (DNS failure, refused).
    #[error("failed to reach the mockup API: {message}")]
    Connect {
        /// Description of the connection failure.
        message: String,
    },

    /// The upstream responded with a server error (status >= 500).
    #[error("mockup API returned server error {status}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    ClientBuild {
        /// Description of the build failure. Never contains the key value.
        message: String,
    },

    /// Any other transport-level failure.
    #[error("transport failure talking to the mockup API: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },
}
