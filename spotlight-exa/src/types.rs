//! Request bodies for the Exa.ai API

use serde::Serialize;
use spotlight_core::{ContentsOptions, SearchOptions, SimilarOptions};

/// Body for `POST /search`
#[derive(Debug, Serialize)]
pub struct ExaSearchRequest {
    /// Search query
    pub query: String,
    /// Result type, count and filters
    #[serde(flatten)]
    pub options: SearchOptions,
    /// Content options
    pub contents: ContentsOptions,
}

/// Body for `POST /findSimilar`
#[derive(Debug, Serialize)]
pub struct ExaFindSimilarRequest {
    /// Page to find neighbours of
    pub url: String,
    /// Result count and domain filters
    #[serde(flatten)]
    pub options: SimilarOptions,
    pub contents: ContentsOptions,
}

/// Body for `POST /answer`
#[derive(Debug, Serialize)]
pub struct ExaAnswerRequest {
    /// Natural-language question
    pub query: String,
    /// Include full source text in citations
    pub text: bool,
}
