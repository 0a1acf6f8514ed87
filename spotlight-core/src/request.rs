//! Inbound search requests and the outbound options derived from them

use serde::Serialize;

/// Upper bound on results requested from the search API per call
pub const MAX_NUM_RESULTS: u32 = 50;

/// Upper bound on search results for the combined query page
pub const MAX_COMBINED_NUM_RESULTS: u32 = 25;

/// Results requested when the form leaves `num_results` empty
pub const DEFAULT_NUM_RESULTS: u32 = 10;

/// Highlights per URL when the form leaves `highlights_per_url` empty
pub const DEFAULT_HIGHLIGHTS_PER_URL: i64 = 2;

/// Sentences per highlight snippet
pub const SENTENCES_PER_HIGHLIGHT: u32 = 2;

/// A search as submitted by the user, after form binding
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Free text query (never blank)
    pub query: String,
    /// Only return results from these domains
    pub include_domains: Option<Vec<String>>,
    /// Never return results from these domains
    pub exclude_domains: Option<Vec<String>>,
    /// Only return pages published within this many days (0 or less = no filter)
    pub recency_days: i64,
    /// Number of results to request, always in `1..=MAX_NUM_RESULTS`
    pub num_results: u32,
    /// Highlight snippets per URL; negative values are floored when translated
    pub highlights_per_url: i64,
    /// Whether to fetch the page body text
    pub include_text: bool,
    /// Optional content category filter (e.g. "news", "research paper")
    pub category: Option<String>,
    /// Whether to ask the API for a generated summary of each hit
    pub summary: bool,
}

impl SearchRequest {
    /// Create a request for `query` with the form defaults
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            include_domains: None,
            exclude_domains: None,
            recency_days: 0,
            num_results: DEFAULT_NUM_RESULTS,
            highlights_per_url: DEFAULT_HIGHLIGHTS_PER_URL,
            include_text: true,
            category: None,
            summary: false,
        }
    }

    /// Clamp a requested result count into the range the API accepts
    pub fn clamp_num_results(requested: i64) -> u32 {
        requested.clamp(1, MAX_NUM_RESULTS as i64) as u32
    }
}

/// Search strategy sent to the API. The front end always lets the API choose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    #[default]
    Auto,
}

/// Options passed to the search call alongside the query
///
/// Optional filters are omitted from the serialized form when absent. The
/// API treats an empty domain list differently from no list at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub num_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    /// ISO 8601 calendar date (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// How highlight snippets are computed for each result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightOptions {
    #[serde(rename = "highlightsPerUrl")]
    pub count: u32,
    #[serde(rename = "numSentences")]
    pub sentences_per_highlight: u32,
    #[serde(rename = "query")]
    pub query_text: String,
}

/// Content extracted for every hit of a search or similar lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentsOptions {
    /// Fetch page body text
    pub text: bool,
    pub highlights: HighlightOptions,
    /// Generated per-page summary; omitted from the body when off
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub summary: bool,
}

/// Options passed to a similar-page lookup alongside the source URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarOptions {
    pub num_results: u32,
    /// Drop results hosted on the source page's domain
    pub exclude_source_domain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
}
