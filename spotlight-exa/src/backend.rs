//! The search-and-answer collaborator seam

use async_trait::async_trait;
use spotlight_core::{ContentsOptions, RawResponse, SearchOptions, SimilarOptions};

use crate::error::ExaError;

/// Search, similarity and answer calls as seen by the request pipelines
///
/// Implementations return the response body classified by shape and leave
/// normalization to the caller. Any failure (transport, auth, quota,
/// malformed request) is an `Err`; there are no retries.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search for `query` and fetch contents for each hit
    async fn search_with_contents(
        &self,
        query: &str,
        contents: &ContentsOptions,
        options: &SearchOptions,
    ) -> Result<RawResponse, ExaError>;

    /// Find pages similar to `url` and fetch contents for each hit
    async fn find_similar_with_contents(
        &self,
        url: &str,
        contents: &ContentsOptions,
        options: &SimilarOptions,
    ) -> Result<RawResponse, ExaError>;

    /// Answer a natural-language question with citations
    async fn answer(&self, question: &str, include_text: bool) -> Result<RawResponse, ExaError>;
}
