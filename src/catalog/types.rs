//! Catalog Data Types
//!
//! `CatalogEntry` is what the rest of the crate works with. `RawRecord` is the lenient
//! shape a log line is first decoded into, before missing ids, legacy keyword strings
//! and absent file paths are normalized.

use serde::{Deserialize, Deserializer, Serialize};

/// Metadata of one cataloged book.
///
/// Field order matches the on-disk record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub filename: Option<String>,
    pub file_path: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub keywords: Vec<String>,
    pub uploader: Option<String>,
    pub timestamp: Option<String>,
}

/// Keywords as they may appear in a record or an upload form.
///
/// Older records store a single comma-separated string, newer ones a JSON array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KeywordsField {
    Text(String),
    List(Vec<serde_json::Value>),
    Other(serde_json::Value),
}

impl KeywordsField {
    /// Produces the normalized keyword sequence: trimmed, non-empty, in input order.
    pub fn normalize(self) -> Vec<String> {
        match self {
            KeywordsField::Text(text) => split_keywords(&text),
            KeywordsField::List(items) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .map(|kw| kw.trim().to_string())
                .filter(|kw| !kw.is_empty())
                .collect(),
            KeywordsField::Other(_) => Vec::new(),
        }
    }
}

impl From<&str> for KeywordsField {
    fn from(text: &str) -> Self {
        KeywordsField::Text(text.to_string())
    }
}

impl From<String> for KeywordsField {
    fn from(text: String) -> Self {
        KeywordsField::Text(text)
    }
}

impl From<Vec<String>> for KeywordsField {
    fn from(items: Vec<String>) -> Self {
        KeywordsField::List(items.into_iter().map(serde_json::Value::String).collect())
    }
}

/// Splits a comma-separated keyword string.
pub fn split_keywords(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

/// A log line decoded as-is, before normalization.
///
/// Every field is optional; text fields accept numbers and booleans too.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub genre: Option<String>,
    #[serde(default)]
    pub keywords: Option<KeywordsField>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub uploader: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
