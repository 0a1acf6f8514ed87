//! Translation of raw form input into outbound search options
//!
//! Everything here is a pure function of its input (and, for the recency
//! window, the current UTC date). Malformed input maps to "absent" or a
//! clamped value instead of an error.

use chrono::{Days, NaiveDate, Utc};

use crate::request::{
    ContentsOptions, HighlightOptions, ResultType, SearchOptions, SearchRequest, SimilarOptions,
    SENTENCES_PER_HIGHLIGHT,
};

/// Highlight query used by the similar lookup when the user gave none
const SIMILAR_FALLBACK_QUERY: &str = "similar";

/// Highlights per URL for the similar lookup
const SIMILAR_HIGHLIGHTS_PER_URL: u32 = 2;

/// Split a comma-separated domain list into trimmed, non-empty entries
///
/// Returns `None` rather than an empty list when nothing remains, so callers
/// can omit the filter entirely. Order and duplicates are preserved.
pub fn parse_domain_list(raw: &str) -> Option<Vec<String>> {
    let domains: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();

    if domains.is_empty() {
        None
    } else {
        Some(domains)
    }
}

/// Earliest publication date for a recency window of `days`, anchored on today in UTC
pub fn recency_to_start_date(days: i64) -> Option<NaiveDate> {
    recency_to_start_date_from(days, Utc::now().date_naive())
}

/// Earliest publication date for a recency window of `days` ending on `today`
///
/// Non-positive windows mean no filter. A window reaching past the start of
/// the calendar also yields `None`.
pub fn recency_to_start_date_from(days: i64, today: NaiveDate) -> Option<NaiveDate> {
    if days <= 0 {
        return None;
    }
    today.checked_sub_days(Days::new(days as u64))
}

/// Build the option set sent with a search call
pub fn build_search_options(request: &SearchRequest) -> SearchOptions {
    SearchOptions {
        result_type: ResultType::Auto,
        num_results: request.num_results,
        include_domains: request.include_domains.clone(),
        exclude_domains: request.exclude_domains.clone(),
        start_published_date: recency_to_start_date(request.recency_days)
            .map(|date| date.format("%Y-%m-%d").to_string()),
        category: request.category.clone(),
    }
}

/// Build highlight options for a search call
pub fn build_highlight_options(request: &SearchRequest) -> HighlightOptions {
    HighlightOptions {
        count: request.highlights_per_url.clamp(0, u32::MAX as i64) as u32,
        sentences_per_highlight: SENTENCES_PER_HIGHLIGHT,
        query_text: request.query.clone(),
    }
}

/// Highlight options for a similar-page lookup, optionally steered by `query`
pub fn similar_highlight_options(query: &str) -> HighlightOptions {
    let query = query.trim();
    HighlightOptions {
        count: SIMILAR_HIGHLIGHTS_PER_URL,
        sentences_per_highlight: SENTENCES_PER_HIGHLIGHT,
        query_text: if query.is_empty() {
            SIMILAR_FALLBACK_QUERY.to_string()
        } else {
            query.to_string()
        },
    }
}

/// Contents requested with a search call
pub fn build_contents_options(request: &SearchRequest) -> ContentsOptions {
    ContentsOptions {
        text: request.include_text,
        highlights: build_highlight_options(request),
        summary: request.summary,
    }
}

/// Contents requested with a similar-page lookup
pub fn similar_contents_options(query: &str) -> ContentsOptions {
    ContentsOptions {
        text: true,
        highlights: similar_highlight_options(query),
        summary: true,
    }
}

/// Options for a similar-page lookup
///
/// When the lookup follows a search, that search's domain filters carry
/// over. The source page's own domain is always excluded.
pub fn build_similar_options(num_results: u32, filters: Option<&SearchRequest>) -> SimilarOptions {
    SimilarOptions {
        num_results,
        exclude_source_domain: true,
        include_domains: filters.and_then(|r| r.include_domains.clone()),
        exclude_domains: filters.and_then(|r| r.exclude_domains.clone()),
    }
}
