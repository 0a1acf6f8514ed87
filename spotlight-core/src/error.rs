//! Error types for the core crate

use thiserror::Error;

/// Errors raised while interpreting a search API response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The body is valid JSON but not an object, so it has no fields to read
    #[error("Response is not an object: {0}")]
    NotResponseShaped(String),
}

impl CoreError {
    pub fn not_response_shaped(msg: impl Into<String>) -> Self {
        CoreError::NotResponseShaped(msg.into())
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
