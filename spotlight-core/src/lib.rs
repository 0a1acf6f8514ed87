//! Core types for the Exa Spotlight front end
//!
//! This crate holds the pure, per-request logic that sits between the HTML
//! forms and the search API:
//! - `translator`: raw form input into outbound search options
//! - `related`: follow-up query suggestions
//! - `response` / `normalizer`: heterogeneous API responses into canonical items

pub mod error;
pub mod item;
pub mod normalizer;
pub mod related;
pub mod request;
pub mod response;
pub mod translator;

pub use error::{CoreError, CoreResult};
pub use item::{AnswerResult, Citation, ResultItem};
pub use normalizer::{extract_result_list, normalize_results, to_answer_result, to_result_item};
pub use related::related_queries;
pub use request::{
    ContentsOptions, HighlightOptions, ResultType, SearchOptions, SearchRequest, SimilarOptions,
};
pub use response::{
    CitationRecord, Field, FieldSource, RawResponse, RawResult, ResponseRecord, ResultRecord,
};
pub use translator::{
    build_contents_options, build_highlight_options, build_search_options, build_similar_options,
    parse_domain_list, recency_to_start_date, recency_to_start_date_from, similar_contents_options,
    similar_highlight_options,
};
