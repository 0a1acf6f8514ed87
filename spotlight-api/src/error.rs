//! Pipeline errors surfaced to the user as error fragments

use axum::http::StatusCode;
use spotlight_exa::ExaError;
use thiserror::Error;

/// Why a pipeline produced no page
///
/// The `Display` text is exactly what the error fragment shows.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The submitted form cannot be turned into a request
    #[error("{0}")]
    InvalidInput(String),

    /// The search API call failed
    #[error(transparent)]
    Backend(#[from] ExaError),
}

impl PipelineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PipelineError::InvalidInput(msg.into())
    }

    /// HTTP status paired with the error fragment
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PipelineError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias for request pipelines
pub type PipelineResult<T> = Result<T, PipelineError>;
