use crate::catalog::types::CatalogEntry;
use serde::{Deserialize, Serialize};

/// Search inputs. `None` and blank strings both mean "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub author: Option<String>,
    pub genre: Option<String>,
    pub keyword: Option<String>,
}

/// Query string of `GET /api/books`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub author: Option<String>,
    pub genre: Option<String>,
    pub keyword: Option<String>,
    pub keywords: Option<String>,
}

impl From<SearchParams> for SearchQuery {
    fn from(params: SearchParams) -> Self {
        // `keyword` wins; `keywords` is accepted for older clients.
        let keyword = params
            .keyword
            .filter(|k| !k.trim().is_empty())
            .or(params.keywords);

        SearchQuery {
            author: params.author,
            genre: params.genre,
            keyword,
        }
    }
}

/// Public view of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookView {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub keywords: Vec<String>,
    pub file_path: Option<String>,
    pub uploader: Option<String>,
    pub timestamp: Option<String>,
}

impl From<CatalogEntry> for BookView {
    fn from(entry: CatalogEntry) -> Self {
        BookView {
            id: entry.id,
            title: entry.title,
            author: entry.author,
            genre: entry.genre,
            keywords: entry.keywords,
            file_path: entry.file_path,
            uploader: entry.uploader,
            timestamp: entry.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    #[serde(flatten)]
    pub book: BookView,
    pub score: usize,
}

impl From<(CatalogEntry, usize)> for SearchResultItem {
    fn from((entry, score): (CatalogEntry, usize)) -> Self {
        SearchResultItem {
            book: entry.into(),
            score,
        }
    }
}
