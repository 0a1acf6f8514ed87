//! Search and similar-page endpoints

use axum::{
    extract::{rejection::FormRejection, State},
    response::Response,
    routing::post,
    Form, Router,
};
use tracing::info;

use super::{bad_form, render};
use crate::forms::{SearchForm, SimilarForm};
use crate::pipeline;
use crate::views;
use crate::AppState;

/// Create search routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(search))
        .route("/similar", post(similar))
}

/// Filtered search rendered as the results fragment
async fn search(
    State(state): State<AppState>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return bad_form(rejection),
    };

    let outcome = match form.into_request() {
        Ok(request) => {
            info!("Search request: q='{}'", request.query);
            pipeline::run_search(state.backend.as_ref(), &request).await
        }
        Err(e) => Err(e),
    };

    render(outcome, views::results_fragment)
}

/// Pages similar to a URL rendered as the similar fragment
async fn similar(
    State(state): State<AppState>,
    form: Result<Form<SimilarForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return bad_form(rejection),
    };

    info!("Similar request: url='{}'", form.url);
    let outcome = pipeline::run_similar(state.backend.as_ref(), &form.url, &form.q).await;

    render(outcome, views::similar_fragment)
}
