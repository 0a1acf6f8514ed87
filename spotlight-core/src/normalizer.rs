//! Normalization of raw API responses into canonical items

use serde_json::Value;

use crate::item::{AnswerResult, Citation, ResultItem};
use crate::response::{Field, FieldSource, RawResponse, RawResult};

/// The result list of a response, in API order
///
/// A missing or non-list `results` entry yields an empty list.
pub fn extract_result_list(response: &RawResponse) -> Vec<RawResult<'_>> {
    match response {
        RawResponse::Mapping(map) => match map.get("results") {
            Some(Value::Array(items)) => items.iter().map(RawResult::from_json).collect(),
            _ => Vec::new(),
        },
        RawResponse::Record(record) => record
            .results
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(RawResult::Record)
            .collect(),
    }
}

/// Flatten one raw result into a [`ResultItem`]
pub fn to_result_item(raw: &impl FieldSource) -> ResultItem {
    ResultItem {
        url: raw.text(Field::Url).unwrap_or_default(),
        title: raw.text(Field::Title).unwrap_or_default(),
        author: raw.text(Field::Author).unwrap_or_default(),
        published_date: raw.text(Field::PublishedDate).unwrap_or_default(),
        domain: raw.text(Field::Domain).unwrap_or_default(),
        favicon: raw.text(Field::Favicon).unwrap_or_default(),
        summary: raw.text(Field::Summary).unwrap_or_default(),
        score: raw.number(Field::Score),
        highlights: raw.strings(Field::Highlights),
        text: raw.text(Field::Text),
    }
}

/// Every result of a response as canonical items
pub fn normalize_results(response: &RawResponse) -> Vec<ResultItem> {
    extract_result_list(response)
        .iter()
        .map(|raw| to_result_item(raw))
        .collect()
}

/// Read the answer text and citations of an answer response
///
/// An absent, null, empty or non-string answer collapses to `None`.
pub fn to_answer_result(response: &RawResponse) -> AnswerResult {
    match response {
        RawResponse::Mapping(map) => AnswerResult {
            answer_text: map
                .get("answer")
                .and_then(Value::as_str)
                .and_then(non_empty),
            citations: match map.get("citations") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| to_citation(&RawResult::from_json(item)))
                    .collect(),
                _ => Vec::new(),
            },
        },
        RawResponse::Record(record) => AnswerResult {
            answer_text: record.answer.as_deref().and_then(non_empty),
            citations: record
                .citations
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|raw| to_citation(raw))
                .collect(),
        },
    }
}

fn to_citation(raw: &impl FieldSource) -> Citation {
    Citation {
        url: raw.text(Field::Url).unwrap_or_default(),
        title: raw.text(Field::Title).unwrap_or_default(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
