//! Per-endpoint request pipelines
//!
//! Each pipeline translates its input, makes one call through the
//! [`SearchBackend`], and normalizes the response into a page payload.
//! Failures come back as [`PipelineError`] values for the route layer to
//! render; nothing here panics or retries.

use spotlight_core::{
    build_contents_options, build_search_options, build_similar_options, normalize_results,
    related_queries, similar_contents_options, to_answer_result, AnswerResult, ResultItem,
    SearchRequest, SimilarOptions,
};
use spotlight_exa::SearchBackend;
use tracing::{info, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::forms::required;

/// Results requested by the similar endpoint
pub const SIMILAR_NUM_RESULTS: u32 = 10;

/// Results requested for the similar section of the combined page
pub const COMBINED_SIMILAR_NUM_RESULTS: u32 = 8;

/// Payload of the results fragment
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub query: String,
    pub results: Vec<ResultItem>,
    pub include_domains: Vec<String>,
    pub exclude_domains: Vec<String>,
    pub recency_days: i64,
}

/// Payload of the similar fragment
#[derive(Debug, Clone)]
pub struct SimilarPage {
    pub url: String,
    pub similar: Vec<ResultItem>,
}

/// Payload of the answer fragment
#[derive(Debug, Clone)]
pub struct AnswerPage {
    pub question: String,
    pub answer: AnswerResult,
}

/// Payload of the combined fragment; every section may be empty
#[derive(Debug, Clone)]
pub struct CombinedPage {
    pub query: String,
    pub answer: Option<AnswerResult>,
    pub results: Vec<ResultItem>,
    pub similar: Vec<ResultItem>,
    /// Follow-up queries; empty when the search branch failed
    pub related: Vec<String>,
}

/// Search with filters and highlights
pub async fn run_search(
    backend: &dyn SearchBackend,
    request: &SearchRequest,
) -> PipelineResult<SearchPage> {
    let options = build_search_options(request);
    let contents = build_contents_options(request);

    let raw = backend
        .search_with_contents(&request.query, &contents, &options)
        .await?;
    let results = normalize_results(&raw);

    info!("Search '{}' returned {} results", request.query, results.len());

    Ok(SearchPage {
        query: request.query.clone(),
        results,
        include_domains: request.include_domains.clone().unwrap_or_default(),
        exclude_domains: request.exclude_domains.clone().unwrap_or_default(),
        recency_days: request.recency_days,
    })
}

/// Pages similar to `url`, with highlights steered by `query`
pub async fn run_similar(
    backend: &dyn SearchBackend,
    url: &str,
    query: &str,
) -> PipelineResult<SimilarPage> {
    let url = validate_page_url(url)?;
    let options = build_similar_options(SIMILAR_NUM_RESULTS, None);
    let similar = lookup_similar(backend, &url, query, &options).await?;

    info!("Similar lookup for {} returned {} results", url, similar.len());

    Ok(SimilarPage { url, similar })
}

/// Natural-language answer with citations
pub async fn run_answer(backend: &dyn SearchBackend, question: &str) -> PipelineResult<AnswerPage> {
    let question = required(question, "Question")?;

    let raw = backend.answer(&question, true).await?;
    let answer = to_answer_result(&raw);

    info!(
        "Answer for '{}': {} ({} citations)",
        question,
        if answer.answer_text.is_some() { "present" } else { "absent" },
        answer.citations.len()
    );

    Ok(AnswerPage { question, answer })
}

/// Answer, search results, similar pages and follow-up queries for a single query box
///
/// The answer and search branches run concurrently and fail independently:
/// a failed branch is logged and leaves its section empty. The similar
/// lookup starts from the top search result and reuses the request's domain
/// filters.
pub async fn run_combined(
    backend: &dyn SearchBackend,
    request: &SearchRequest,
) -> PipelineResult<CombinedPage> {
    let query = &request.query;

    let (answer, search) = tokio::join!(run_answer(backend, query), run_search(backend, request));

    let answer = match answer {
        Ok(page) => Some(page.answer),
        Err(e) => {
            warn!("Answer branch failed for '{}': {}", query, e);
            None
        }
    };

    let (results, related) = match search {
        Ok(page) => (page.results, related_queries(query)),
        Err(e) => {
            warn!("Search branch failed for '{}': {}", query, e);
            (Vec::new(), Vec::new())
        }
    };

    // Neighbours of the top hit
    let similar = match results.first().filter(|top| !top.url.is_empty()) {
        Some(top) => {
            let options = build_similar_options(COMBINED_SIMILAR_NUM_RESULTS, Some(request));
            match lookup_similar(backend, &top.url, query, &options).await {
                Ok(similar) => similar,
                Err(e) => {
                    warn!("Similar branch failed for '{}': {}", top.url, e);
                    Vec::new()
                }
            }
        }
        None => Vec::new(),
    };

    Ok(CombinedPage {
        query: query.clone(),
        answer,
        results,
        similar,
        related,
    })
}

async fn lookup_similar(
    backend: &dyn SearchBackend,
    url: &str,
    query: &str,
    options: &SimilarOptions,
) -> PipelineResult<Vec<ResultItem>> {
    let contents = similar_contents_options(query);
    let raw = backend
        .find_similar_with_contents(url, &contents, options)
        .await?;
    Ok(normalize_results(&raw))
}

/// Accept only absolute http(s) URLs for similarity lookups
fn validate_page_url(raw: &str) -> PipelineResult<String> {
    let raw = required(raw, "URL")?;
    match url::Url::parse(&raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(raw),
        Ok(parsed) => Err(PipelineError::invalid_input(format!(
            "Unsupported URL scheme '{}'",
            parsed.scheme()
        ))),
        Err(e) => Err(PipelineError::invalid_input(format!("Invalid URL '{}': {}", raw, e))),
    }
}
