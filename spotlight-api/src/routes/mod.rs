//! Route definitions

mod answer;
mod health;
mod index;
mod search;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Router,
};
use tracing::error;

use crate::error::PipelineResult;
use crate::views;
use crate::AppState;

/// Create all routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(index::routes())
        .merge(search::routes())
        .merge(answer::routes())
        .merge(health::routes())
}

/// Render a pipeline outcome: the view on success, the error fragment otherwise
fn render<T>(outcome: PipelineResult<T>, view: impl FnOnce(&T) -> String) -> Response {
    match outcome {
        Ok(page) => (StatusCode::OK, Html(view(&page))).into_response(),
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                error!("Request failed: {}", e);
            }
            (status, Html(views::error_fragment(&e.to_string()))).into_response()
        }
    }
}

/// Error fragment for a form body that could not be decoded
fn bad_form(rejection: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(views::error_fragment(&rejection.to_string())),
    )
        .into_response()
}
