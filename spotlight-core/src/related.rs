//! Follow-up queries suggested under the combined results

/// Number of suggestions always returned
pub const RELATED_QUERY_COUNT: usize = 5;

/// Suggestions shorter than this are dropped
const MIN_RELATED_QUERY_CHARS: usize = 10;

const QUESTION_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "is", "are", "do", "does", "can", "could", "should",
    "would", "will",
];

const FALLBACK_QUERIES: &[&str] = &[
    "What are the key features to consider?",
    "How do I compare different options?",
    "What are the pros and cons?",
    "Which one is the best choice?",
    "What should I know before deciding?",
];

/// Topic of a query: the query minus its first question word and trailing `?`
pub fn query_topic(query: &str) -> String {
    let mut dropped = false;
    let words: Vec<&str> = query
        .split_whitespace()
        .filter(|word| {
            if dropped {
                return true;
            }
            let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
            if QUESTION_WORDS.iter().any(|q| q.eq_ignore_ascii_case(bare)) {
                dropped = true;
                return false;
            }
            true
        })
        .collect();

    words.join(" ").trim_end_matches('?').trim().to_string()
}

/// Exactly [`RELATED_QUERY_COUNT`] follow-up queries for `query`
///
/// Templated suggestions built around the query's topic come first; generic
/// ones fill the remaining slots.
pub fn related_queries(query: &str) -> Vec<String> {
    let topic = query_topic(query);
    let templates = [
        format!("What are the best {}", topic),
        format!("How to choose {}", topic),
        format!("Compare {}", topic),
        format!("Top {}", topic),
        format!("Guide to {}", topic),
    ];

    let mut related: Vec<String> = templates
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| s.chars().count() > MIN_RELATED_QUERY_CHARS && s != query.trim())
        .take(RELATED_QUERY_COUNT)
        .collect();

    let missing = RELATED_QUERY_COUNT - related.len();
    related.extend(FALLBACK_QUERIES.iter().take(missing).map(|s| s.to_string()));
    related
}
