//! Exa Spotlight web front end
//!
//! Renders HTML fragments for search, similar-page lookup, question
//! answering and a combined single-box query, all backed by Exa.

pub mod config;
pub mod error;
pub mod forms;
pub mod pipeline;
mod routes;
pub mod views;

use std::path::Path;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use spotlight_exa::SearchBackend;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use config::{AppConfig, ConfigError};
pub use error::{PipelineError, PipelineResult};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Search, similarity and answer calls
    pub backend: Arc<dyn SearchBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }
}

/// Build the router with all routes, static assets and middleware
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
