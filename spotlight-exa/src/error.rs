//! Error types for the Exa client

use spotlight_core::CoreError;
use thiserror::Error;

/// Errors that can occur while calling Exa
#[derive(Debug, Error)]
pub enum ExaError {
    /// HTTP request failed (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Body parsed but is not a response object
    #[error(transparent)]
    Normalize(#[from] CoreError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
