//! Raw search API responses
//!
//! The API body reaches us in one of two shapes: a typed record (when the
//! JSON decodes cleanly into [`ResponseRecord`]) or a loose JSON mapping
//! (when it does not, e.g. a field carries an unexpected type). The shape is
//! decided once in [`RawResponse::from_value`]; after that, field access goes
//! through the [`FieldSource`] adapter so the normalizer never branches on
//! shape per field.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Fields the normalizer reads from a result or citation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Title,
    Author,
    PublishedDate,
    Domain,
    Favicon,
    Summary,
    Score,
    Highlights,
    Text,
}

impl Field {
    /// Mapping keys accepted for this field, in lookup order
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Field::Url => &["url"],
            Field::Title => &["title"],
            Field::Author => &["author"],
            Field::PublishedDate => &["published_date", "publishedDate"],
            Field::Domain => &["domain"],
            Field::Favicon => &["favicon"],
            Field::Summary => &["summary"],
            Field::Score => &["score"],
            Field::Highlights => &["highlights"],
            Field::Text => &["text"],
        }
    }
}

/// Read access to the fields of one raw result, independent of its shape
///
/// Every accessor returns `None` when the field is missing or unusable.
/// Implementations must never panic.
pub trait FieldSource {
    fn text(&self, field: Field) -> Option<String>;
    fn number(&self, field: Field) -> Option<f64>;
    fn strings(&self, field: Field) -> Option<Vec<String>>;
}

/// Typed view of a response body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub results: Option<Vec<ResultRecord>>,
    pub answer: Option<String>,
    pub citations: Option<Vec<CitationRecord>>,
    pub request_id: Option<String>,
}

/// Typed view of one search or similarity result
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(alias = "published_date")]
    pub published_date: Option<String>,
    pub domain: Option<String>,
    pub favicon: Option<String>,
    pub summary: Option<String>,
    pub score: Option<f64>,
    pub highlights: Option<Vec<String>>,
    pub text: Option<String>,
}

/// Typed view of one answer citation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationRecord {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
}

/// A response body, classified once by shape
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Mapping(Map<String, Value>),
    Record(Box<ResponseRecord>),
}

impl RawResponse {
    /// Classify a decoded JSON body
    ///
    /// Objects that fit [`ResponseRecord`] become `Record`; other objects are
    /// kept as `Mapping`. Anything that is not an object has no fields to
    /// read and is rejected.
    pub fn from_value(value: Value) -> CoreResult<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(CoreError::not_response_shaped(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        match serde_json::from_value::<ResponseRecord>(Value::Object(map.clone())) {
            Ok(record) => Ok(RawResponse::Record(Box::new(record))),
            Err(_) => Ok(RawResponse::Mapping(map)),
        }
    }
}

/// One entry of a response's result list, borrowed from the response
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawResult<'a> {
    Mapping(&'a Map<String, Value>),
    Record(&'a ResultRecord),
    /// A list entry that is not an object; every field reads as absent
    Empty,
}

impl<'a> RawResult<'a> {
    /// Wrap one element of a mapping-shaped result list
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => RawResult::Mapping(map),
            _ => RawResult::Empty,
        }
    }
}

impl FieldSource for RawResult<'_> {
    fn text(&self, field: Field) -> Option<String> {
        match self {
            RawResult::Mapping(map) => map.text(field),
            RawResult::Record(record) => record.text(field),
            RawResult::Empty => None,
        }
    }

    fn number(&self, field: Field) -> Option<f64> {
        match self {
            RawResult::Mapping(map) => map.number(field),
            RawResult::Record(record) => record.number(field),
            RawResult::Empty => None,
        }
    }

    fn strings(&self, field: Field) -> Option<Vec<String>> {
        match self {
            RawResult::Mapping(map) => map.strings(field),
            RawResult::Record(record) => record.strings(field),
            RawResult::Empty => None,
        }
    }
}

/// First non-null value stored under any of the field's keys
fn lookup(map: &Map<String, Value>, field: Field) -> Option<&Value> {
    field
        .keys()
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

impl FieldSource for Map<String, Value> {
    fn text(&self, field: Field) -> Option<String> {
        match lookup(self, field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn number(&self, field: Field) -> Option<f64> {
        match lookup(self, field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn strings(&self, field: Field) -> Option<Vec<String>> {
        match lookup(self, field)? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            Value::String(s) => Some(vec![s.clone()]),
            _ => None,
        }
    }
}

impl FieldSource for ResultRecord {
    fn text(&self, field: Field) -> Option<String> {
        match field {
            Field::Url => self.url.clone(),
            Field::Title => self.title.clone(),
            Field::Author => self.author.clone(),
            Field::PublishedDate => self.published_date.clone(),
            Field::Domain => self.domain.clone(),
            Field::Favicon => self.favicon.clone(),
            Field::Summary => self.summary.clone(),
            Field::Text => self.text.clone(),
            Field::Score => self.score.map(|s| s.to_string()),
            Field::Highlights => None,
        }
    }

    fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Score => self.score,
            _ => None,
        }
    }

    fn strings(&self, field: Field) -> Option<Vec<String>> {
        match field {
            Field::Highlights => self.highlights.clone(),
            _ => None,
        }
    }
}

impl FieldSource for CitationRecord {
    fn text(&self, field: Field) -> Option<String> {
        match field {
            Field::Url => self.url.clone(),
            Field::Title => self.title.clone(),
            _ => None,
        }
    }

    fn number(&self, _field: Field) -> Option<f64> {
        None
    }

    fn strings(&self, _field: Field) -> Option<Vec<String>> {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
