use super::tokenizer::{normalize_filter, tokenize_query};
use super::types::SearchQuery;
use crate::catalog::types::CatalogEntry;

/// Filters and ranks `entries`.
///
/// Author and genre are case-insensitive substring filters; when both are given both must
/// match. Keyword tokens score one point each against title/author, else against the
/// keywords. Without filters, entries scoring zero are dropped; with filters every
/// filtered entry is kept and the score only orders them. Ties keep catalog order.
pub fn search(entries: Vec<CatalogEntry>, query: &SearchQuery) -> Vec<(CatalogEntry, usize)> {
    let author_q = normalize_filter(query.author.as_deref());
    let genre_q = normalize_filter(query.genre.as_deref());
    let tokens = query
        .keyword
        .as_deref()
        .map(tokenize_query)
        .unwrap_or_default();

    let filtered = author_q.is_some() || genre_q.is_some();

    let mut results: Vec<(CatalogEntry, usize)> = entries
        .into_iter()
        .filter(|entry| passes_filters(entry, author_q.as_deref(), genre_q.as_deref()))
        .map(|entry| {
            let score = score_entry(&entry, &tokens);
            (entry, score)
        })
        .collect();

    if tokens.is_empty() {
        return results;
    }

    if !filtered {
        results.retain(|(_, score)| *score > 0);
    }

    results.sort_by(|a, b| b.1.cmp(&a.1));
    results
}

/// Applies the exact-field filters. Unset filters always pass.
pub fn passes_filters(entry: &CatalogEntry, author_q: Option<&str>, genre_q: Option<&str>) -> bool {
    let author_match = author_q.is_none_or(|q| contains_lower(entry.author.as_deref(), q));
    let genre_match = genre_q.is_none_or(|q| contains_lower(entry.genre.as_deref(), q));
    author_match && genre_match
}

/// Number of tokens matching the entry.
pub fn score_entry(entry: &CatalogEntry, tokens: &[String]) -> usize {
    if tokens.is_empty() {
        return 0;
    }

    let title = entry.title.as_deref().unwrap_or_default().to_lowercase();
    let author = entry.author.as_deref().unwrap_or_default().to_lowercase();
    let keywords: Vec<String> = entry.keywords.iter().map(|kw| kw.to_lowercase()).collect();

    tokens
        .iter()
        .filter(|token| {
            title.contains(token.as_str())
                || author.contains(token.as_str())
                || keywords.iter().any(|kw| kw.contains(token.as_str()))
        })
        .count()
}

fn contains_lower(field: Option<&str>, needle: &str) -> bool {
    field.unwrap_or_default().to_lowercase().contains(needle)
}
