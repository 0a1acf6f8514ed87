//! Health check endpoint

use axum::{response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
}

/// Readiness check (always OK if the server is running)
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
