//! Form bodies posted by the UI
//!
//! Browsers send every field as a string and send empty strings for blank
//! inputs, so numeric and boolean fields go through lenient deserializers:
//! blank means "use the default", anything else must parse.

use serde::{de, Deserialize, Deserializer};
use spotlight_core::request::{
    DEFAULT_HIGHLIGHTS_PER_URL, DEFAULT_NUM_RESULTS, MAX_COMBINED_NUM_RESULTS,
};
use spotlight_core::{parse_domain_list, SearchRequest};

use crate::error::{PipelineError, PipelineResult};

/// `POST /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
    /// Comma-separated domains
    #[serde(default)]
    pub include_domains: String,
    /// Comma-separated domains
    #[serde(default)]
    pub exclude_domains: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub recency_days: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub num_results: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub highlights_per_url: Option<i64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub include_text: Option<bool>,
    #[serde(default)]
    pub category: String,
}

impl SearchForm {
    /// Bind the form into a [`SearchRequest`], applying defaults and clamps
    pub fn into_request(self) -> PipelineResult<SearchRequest> {
        let query = required(&self.q, "Query")?;

        let category = match self.category.trim() {
            "" | "all" => None,
            other => Some(other.to_string()),
        };

        Ok(SearchRequest {
            query,
            include_domains: parse_domain_list(&self.include_domains),
            exclude_domains: parse_domain_list(&self.exclude_domains),
            recency_days: self.recency_days.unwrap_or(0),
            num_results: SearchRequest::clamp_num_results(
                self.num_results.unwrap_or(DEFAULT_NUM_RESULTS as i64),
            ),
            highlights_per_url: self.highlights_per_url.unwrap_or(DEFAULT_HIGHLIGHTS_PER_URL),
            include_text: self.include_text.unwrap_or(true),
            category,
            summary: false,
        })
    }
}

/// `POST /similar`
#[derive(Debug, Default, Deserialize)]
pub struct SimilarForm {
    #[serde(default)]
    pub url: String,
    /// Optional steer for highlight extraction
    #[serde(default)]
    pub q: String,
}

/// `POST /answer`
#[derive(Debug, Default, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub question: String,
}

/// `POST /query`
///
/// Only the query is mandatory. The optional filters apply to the search
/// branch and, for the domain lists, to the similar branch as well.
#[derive(Debug, Default, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub include_domains: String,
    #[serde(default)]
    pub exclude_domains: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub recency_days: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub num_results: Option<i64>,
    #[serde(default)]
    pub category: String,
}

impl QueryForm {
    /// Bind the form into the [`SearchRequest`] driving every branch
    ///
    /// Same binding as [`SearchForm`], with a lower result cap and summaries on.
    pub fn into_request(self) -> PipelineResult<SearchRequest> {
        let mut request = SearchForm {
            q: self.q,
            include_domains: self.include_domains,
            exclude_domains: self.exclude_domains,
            recency_days: self.recency_days,
            num_results: self.num_results,
            category: self.category,
            ..SearchForm::default()
        }
        .into_request()?;

        request.num_results = request.num_results.min(MAX_COMBINED_NUM_RESULTS);
        request.summary = true;
        Ok(request)
    }
}

/// Trimmed value of a mandatory text field
pub fn required(value: &str, label: &str) -> PipelineResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PipelineError::invalid_input(format!("{} is required", label)));
    }
    Ok(value.to_string())
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid integer '{}'", raw)))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "on" | "1" | "yes" => Ok(Some(true)),
        "false" | "off" | "0" | "no" => Ok(Some(false)),
        other => Err(de::Error::custom(format!("invalid boolean '{}'", other))),
    }
}
