//! Canonical, shape-independent records handed to the presentation layer

/// A single search or similarity result after normalization
///
/// Every field is optional in the source response. Missing scalars become
/// empty strings and missing collections stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultItem {
    pub url: String,
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub domain: String,
    /// Icon URL reported by the API
    pub favicon: String,
    /// Generated summary, when one was requested and returned
    pub summary: String,
    /// Relevance score, when the API reported one
    pub score: Option<f64>,
    pub highlights: Option<Vec<String>>,
    pub text: Option<String>,
}

/// A source backing a generated answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    pub url: String,
    pub title: String,
}

/// A natural-language answer with its citations, in the order returned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerResult {
    pub answer_text: Option<String>,
    pub citations: Vec<Citation>,
}
