use regex::Regex;
use std::sync::OnceLock;

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[,\s]+").expect("valid separator regex"))
}

/// Splits a free-text keyword query into lower-cased tokens.
///
/// Runs of whitespace and commas separate tokens. Order and repeats are kept.
pub fn tokenize_query(query: &str) -> Vec<String> {
    separators()
        .split(&query.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes an optional filter value: trimmed, lower-cased, `None` when blank.
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
