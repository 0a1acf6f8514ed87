//! Router tests against a scripted search backend
//!
//! Run with: cargo test -p spotlight-api --test routes

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use spotlight_api::{app, AppState};
use spotlight_core::{ContentsOptions, RawResponse, SearchOptions, SimilarOptions};
use spotlight_exa::{ExaError, SearchBackend};
use tower::ServiceExt;

/// Canned reply for one kind of call
#[derive(Clone)]
enum Reply {
    Body(Value),
    Fail(&'static str),
}

impl Reply {
    fn respond(&self) -> Result<RawResponse, ExaError> {
        match self {
            Reply::Body(body) => Ok(RawResponse::from_value(body.clone())?),
            Reply::Fail(msg) => Err(ExaError::RequestFailed(msg.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
struct SearchCall {
    query: String,
    contents: ContentsOptions,
    options: SearchOptions,
}

#[derive(Debug, Clone)]
struct SimilarCall {
    url: String,
    contents: ContentsOptions,
    options: SimilarOptions,
}

impl SimilarCall {
    fn url_and_count(&self) -> (String, u32) {
        (self.url.clone(), self.options.num_results)
    }
}

struct ScriptedBackend {
    search: Reply,
    similar: Reply,
    answer: Reply,
    searches: Mutex<Vec<SearchCall>>,
    similars: Mutex<Vec<SimilarCall>>,
}

impl ScriptedBackend {
    fn new(search: Reply, similar: Reply, answer: Reply) -> Arc<Self> {
        Arc::new(Self {
            search,
            similar,
            answer,
            searches: Mutex::new(Vec::new()),
            similars: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search_with_contents(
        &self,
        query: &str,
        contents: &ContentsOptions,
        options: &SearchOptions,
    ) -> Result<RawResponse, ExaError> {
        self.searches.lock().unwrap().push(SearchCall {
            query: query.to_string(),
            contents: contents.clone(),
            options: options.clone(),
        });
        self.search.respond()
    }

    async fn find_similar_with_contents(
        &self,
        url: &str,
        contents: &ContentsOptions,
        options: &SimilarOptions,
    ) -> Result<RawResponse, ExaError> {
        assert!(options.exclude_source_domain);
        self.similars.lock().unwrap().push(SimilarCall {
            url: url.to_string(),
            contents: contents.clone(),
            options: options.clone(),
        });
        self.similar.respond()
    }

    async fn answer(&self, _question: &str, include_text: bool) -> Result<RawResponse, ExaError> {
        assert!(include_text);
        self.answer.respond()
    }
}

fn search_body() -> Reply {
    Reply::Body(json!({
        "results": [
            {
                "url": "https://docs.rs/axum",
                "title": "axum docs",
                "author": "tokio",
                "publishedDate": "2024-03-01T00:00:00.000Z",
                "score": 0.8,
                "highlights": ["Ergonomic web framework"]
            }
        ]
    }))
}

fn similar_body() -> Reply {
    Reply::Body(json!({"results": [{"url": "https://actix.rs", "title": "Actix"}]}))
}

fn answer_body() -> Reply {
    Reply::Body(json!({
        "answer": "Use axum.",
        "citations": [{"url": "https://github.com/tokio-rs/axum", "title": "axum repo"}]
    }))
}

fn router(backend: Arc<ScriptedBackend>) -> Router {
    app(AppState::new(backend), "static")
}

async fn post_form(router: Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(router(backend), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn test_index_page() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(router(backend), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("hx-post=\"/query\""));
    assert!(body.contains("name=\"include_domains\""));
}

#[tokio::test]
async fn test_search_translates_form_into_options() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, body) = post_form(
        router(backend.clone()),
        "/search",
        "q=rust+web&include_domains=docs.rs%2C+%2Cgithub.com%2C&exclude_domains=+%2C+&recency_days=0&num_results=500&highlights_per_url=-1&include_text=false",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("axum docs"));
    assert!(body.contains("Ergonomic web framework"));
    assert!(body.contains("only docs.rs, github.com"));

    let searches = backend.searches.lock().unwrap();
    assert_eq!(searches.len(), 1);
    let call = &searches[0];
    assert_eq!(call.query, "rust web");
    assert!(!call.contents.text);
    assert!(!call.contents.summary);
    assert_eq!(call.contents.highlights.count, 0);
    assert_eq!(call.contents.highlights.query_text, "rust web");
    assert_eq!(
        call.options.include_domains,
        Some(vec!["docs.rs".to_string(), "github.com".to_string()])
    );
    assert_eq!(call.options.exclude_domains, None);
    assert_eq!(call.options.start_published_date, None);
    assert_eq!(call.options.num_results, 50);
}

#[tokio::test]
async fn test_search_with_recency_sets_start_date() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, _) = post_form(router(backend.clone()), "/search", "q=news&recency_days=3").await;

    assert_eq!(status, StatusCode::OK);
    let searches = backend.searches.lock().unwrap();
    let start = searches[0].options.start_published_date.clone().unwrap();
    assert_eq!(start.len(), 10);
}

#[tokio::test]
async fn test_search_blank_query_is_bad_request() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, body) = post_form(router(backend.clone()), "/search", "q=+").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("Query is required"));
    assert!(backend.searches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_failure_renders_error_fragment() {
    let backend = ScriptedBackend::new(Reply::Fail("quota exceeded"), similar_body(), answer_body());

    let (status, body) = post_form(router(backend), "/search", "q=rust").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Request failed: quota exceeded"));
}

#[tokio::test]
async fn test_search_empty_results() {
    let backend = ScriptedBackend::new(
        Reply::Body(json!({"results": []})),
        similar_body(),
        answer_body(),
    );

    let (status, body) = post_form(router(backend), "/search", "q=nothing").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No results found."));
}

#[tokio::test]
async fn test_search_escapes_result_text() {
    let backend = ScriptedBackend::new(
        Reply::Body(json!({"results": [{"url": "https://x.com", "title": "<script>alert(1)</script>"}]})),
        similar_body(),
        answer_body(),
    );

    let (_, body) = post_form(router(backend), "/search", "q=x").await;

    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!body.contains("<script>alert"));
}

#[tokio::test]
async fn test_answer_transport_error() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), Reply::Fail("connection reset"));

    let (status, body) = post_form(router(backend), "/answer", "question=what+is+axum").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("connection reset"));
}

#[tokio::test]
async fn test_answer_success() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, body) = post_form(router(backend), "/answer", "question=which+framework").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("which framework"));
    assert!(body.contains("Use axum."));
    assert!(body.contains("axum repo"));
}

#[tokio::test]
async fn test_similar_success() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, body) = post_form(
        router(backend.clone()),
        "/similar",
        "url=https%3A%2F%2Ftokio.rs%2F&q=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Actix"));

    let similars = backend.similars.lock().unwrap();
    assert_eq!(similars.len(), 1);
    assert_eq!(similars[0].url_and_count(), ("https://tokio.rs/".to_string(), 10));
    assert!(similars[0].contents.summary);
    assert_eq!(similars[0].options.include_domains, None);
}

#[tokio::test]
async fn test_similar_highlights_follow_focus_query() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    post_form(router(backend.clone()), "/similar", "url=https%3A%2F%2Ftokio.rs%2F&q=databases").await;
    post_form(router(backend.clone()), "/similar", "url=https%3A%2F%2Ftokio.rs%2F&q=").await;

    let similars = backend.similars.lock().unwrap();
    assert_eq!(similars.len(), 2);
    assert_eq!(similars[0].contents.highlights.query_text, "databases");
    assert_eq!(similars[1].contents.highlights.query_text, "similar");
}

#[tokio::test]
async fn test_similar_failure_renders_error_fragment() {
    let backend = ScriptedBackend::new(search_body(), Reply::Fail("upstream 503"), answer_body());

    let (status, body) = post_form(router(backend), "/similar", "url=https%3A%2F%2Ftokio.rs%2F").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("upstream 503"));
}

#[tokio::test]
async fn test_similar_rejects_bad_url() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, body) = post_form(router(backend.clone()), "/similar", "url=tokio.rs").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid URL"));
    assert!(backend.similars.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_query_survives_answer_failure() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), Reply::Fail("timeout"));

    let (status, body) = post_form(router(backend.clone()), "/query", "q=rust+web").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("class=\"answer\""));
    assert!(!body.contains("class=\"error\""));
    assert!(body.contains("axum docs"));
    assert!(body.contains("Actix"));
    assert!(body.contains("Related Questions"));

    let similars = backend.similars.lock().unwrap();
    assert_eq!(similars.len(), 1);
    assert_eq!(similars[0].url_and_count(), ("https://docs.rs/axum".to_string(), 8));
}

#[tokio::test]
async fn test_query_survives_search_failure() {
    let backend = ScriptedBackend::new(Reply::Fail("quota exceeded"), similar_body(), answer_body());

    let (status, body) = post_form(router(backend.clone()), "/query", "q=rust+web").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Use axum."));
    assert!(body.contains("No results found."));
    assert!(!body.contains("Related Questions"));
    assert!(backend.similars.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_query_survives_similar_failure() {
    let backend = ScriptedBackend::new(search_body(), Reply::Fail("boom"), answer_body());

    let (status, body) = post_form(router(backend), "/query", "q=rust").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Use axum."));
    assert!(body.contains("axum docs"));
    assert!(!body.contains("Similar Pages"));
}

#[tokio::test]
async fn test_query_uses_fixed_search_defaults() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    post_form(router(backend.clone()), "/query", "q=rust").await;

    let searches = backend.searches.lock().unwrap();
    let call = &searches[0];
    assert!(call.contents.text);
    assert!(call.contents.summary);
    assert_eq!(call.options.num_results, 10);
    assert_eq!(call.contents.highlights.count, 2);
    assert_eq!(call.options.include_domains, None);
}

#[tokio::test]
async fn test_query_forwards_filters_to_search_and_similar() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, _) = post_form(
        router(backend.clone()),
        "/query",
        "q=rust&include_domains=docs.rs&exclude_domains=reddit.com&recency_days=30&num_results=100&category=news",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let searches = backend.searches.lock().unwrap();
    let search = &searches[0];
    assert_eq!(search.options.num_results, 25);
    assert_eq!(search.options.include_domains, Some(vec!["docs.rs".to_string()]));
    assert_eq!(search.options.exclude_domains, Some(vec!["reddit.com".to_string()]));
    assert_eq!(search.options.category.as_deref(), Some("news"));
    assert!(search.options.start_published_date.is_some());

    let similars = backend.similars.lock().unwrap();
    let similar = &similars[0];
    assert_eq!(similar.options.num_results, 8);
    assert_eq!(similar.options.include_domains, Some(vec!["docs.rs".to_string()]));
    assert_eq!(similar.options.exclude_domains, Some(vec!["reddit.com".to_string()]));
    assert_eq!(similar.contents.highlights.query_text, "rust");
}

#[tokio::test]
async fn test_query_renders_summaries_and_related_queries() {
    let backend = ScriptedBackend::new(
        Reply::Body(json!({
            "results": [{
                "url": "https://docs.rs/axum",
                "title": "axum docs",
                "favicon": "https://docs.rs/favicon.ico",
                "summary": "Web framework built on tower."
            }]
        })),
        similar_body(),
        answer_body(),
    );

    let (status, body) = post_form(router(backend), "/query", "q=rust+web+frameworks").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Web framework built on tower."));
    assert!(body.contains("src=\"https://docs.rs/favicon.ico\""));
    assert!(body.contains("value=\"Compare rust web frameworks\""));
}

#[tokio::test]
async fn test_query_blank_is_bad_request() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, _) = post_form(router(backend), "/query", "q=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_form_is_bad_request() {
    let backend = ScriptedBackend::new(search_body(), similar_body(), answer_body());

    let (status, body) = post_form(router(backend), "/search", "q=x&num_results=lots").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("class=\"error\""));
}
