//! The search page itself

use axum::{response::Html, routing::get, Router};

use crate::views;
use crate::AppState;

/// Create index routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Serve the full HTML page; fragments are fetched from the POST endpoints
async fn index() -> Html<&'static str> {
    Html(views::index_page())
}
