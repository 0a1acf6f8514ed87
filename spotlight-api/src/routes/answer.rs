//! Answer and combined query endpoints

use axum::{
    extract::{rejection::FormRejection, State},
    response::Response,
    routing::post,
    Form, Router,
};
use tracing::info;

use super::{bad_form, render};
use crate::forms::{AnswerForm, QueryForm};
use crate::pipeline;
use crate::views;
use crate::AppState;

/// Create answer routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/answer", post(answer))
        .route("/query", post(query))
}

/// Answer a question with citations
async fn answer(
    State(state): State<AppState>,
    form: Result<Form<AnswerForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return bad_form(rejection),
    };

    info!("Answer request: question='{}'", form.question);
    let outcome = pipeline::run_answer(state.backend.as_ref(), &form.question).await;

    render(outcome, views::answer_fragment)
}

/// Single search box: answer, results, similar pages and related queries together
///
/// Branch failures degrade to empty sections, so this only errors on a
/// blank query.
async fn query(
    State(state): State<AppState>,
    form: Result<Form<QueryForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return bad_form(rejection),
    };

    let outcome = match form.into_request() {
        Ok(request) => {
            info!("Combined query: q='{}'", request.query);
            pipeline::run_combined(state.backend.as_ref(), &request).await
        }
        Err(e) => Err(e),
    };

    render(outcome, views::combined_fragment)
}
