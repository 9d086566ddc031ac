use super::engine::search;
use super::types::{BookView, SearchParams, SearchQuery, SearchResultItem};
use crate::catalog::index::get_by_id;
use crate::error::{CatalogError, ErrorResponse};
use crate::library::Library;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(library): Extension<Arc<Library>>,
) -> Result<Json<Vec<SearchResultItem>>, (StatusCode, Json<ErrorResponse>)> {
    let query = SearchQuery::from(params);

    let entries = library.blocking(|library| library.catalog()).await.map_err(|e| {
        tracing::error!("Failed to rebuild catalog: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("catalog unavailable")),
        )
    })?;

    let results: Vec<SearchResultItem> = search(entries, &query)
        .into_iter()
        .map(SearchResultItem::from)
        .collect();

    tracing::debug!("Search {:?} returned {} results", query, results.len());
    Ok(Json(results))
}

pub async fn handle_get_book(
    Path(book_id): Path<String>,
    Extension(library): Extension<Arc<Library>>,
) -> Result<Json<BookView>, (StatusCode, Json<ErrorResponse>)> {
    let id = book_id.clone();
    let found = library
        .blocking(move |library| get_by_id(&library.log, &id))
        .await;

    match found {
        Ok(entry) => Ok(Json(entry.into())),
        Err(CatalogError::NotFound { .. }) => {
            Err((StatusCode::NOT_FOUND, Json(ErrorResponse::new("not found"))))
        }
        Err(e) => {
            tracing::error!("Failed to look up {}: {}", book_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("catalog unavailable")),
            ))
        }
    }
}
