//! Exa.ai client for the Spotlight front end
//!
//! - `backend`: the [`SearchBackend`] seam the HTTP layer calls through
//! - `client`: [`ExaClient`], the reqwest implementation against api.exa.ai
//! - `types`: wire-level request bodies

pub mod backend;
pub mod client;
pub mod error;
pub mod types;

pub use backend::SearchBackend;
pub use client::{ExaClient, ExaConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::ExaError;
