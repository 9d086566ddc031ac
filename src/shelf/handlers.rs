use super::types::{ShelfCheckResponse, ShelfRequest, ShelfUpdateResponse};
use crate::catalog::index::find_by_id;
use crate::error::{CatalogError, ErrorResponse};
use crate::identity::{Capability, UserIdentity};
use crate::library::Library;
use crate::search::types::BookView;

use axum::extract::{FromRequest, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Form, Json};
use std::sync::Arc;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn shelf_unavailable(e: CatalogError) -> ApiError {
    tracing::error!("Shelf request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("shelf unavailable")),
    )
}

pub async fn handle_list_shelf(
    Extension(library): Extension<Arc<Library>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookView>>, ApiError> {
    let user = UserIdentity::from_headers(&headers);

    let books = library
        .blocking(move |library| {
            let book_ids = library.shelves.list(&user.username);
            let entries = library.catalog()?;
            Ok(book_ids
                .iter()
                .filter_map(|id| find_by_id(&entries, id))
                .map(BookView::from)
                .collect())
        })
        .await
        .map_err(shelf_unavailable)?;

    Ok(Json(books))
}

pub async fn handle_check_shelf(
    Path(book_id): Path<String>,
    Extension(library): Extension<Arc<Library>>,
    headers: HeaderMap,
) -> Result<Json<ShelfCheckResponse>, ApiError> {
    let user = UserIdentity::from_headers(&headers);

    let in_shelf = library
        .blocking(move |library| Ok(library.shelves.contains(&user.username, &book_id)))
        .await
        .map_err(shelf_unavailable)?;

    Ok(Json(ShelfCheckResponse { in_shelf }))
}

/// Accepts `book_id` either form-encoded or as a JSON body.
pub async fn handle_add_to_shelf(
    Extension(library): Extension<Arc<Library>>,
    request: Request,
) -> Result<Json<ShelfUpdateResponse>, ApiError> {
    let user = UserIdentity::from_headers(request.headers());
    if !user.can(Capability::Borrow) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("borrowing not permitted")),
        ));
    }
    let book_id = required_book_id(read_shelf_request(request).await)?;

    tracing::debug!("Adding {} to shelf of {}", book_id, user.username);
    library
        .blocking(move |library| library.shelves.add(&user.username, &book_id))
        .await
        .map_err(shelf_unavailable)?;

    Ok(Json(ShelfUpdateResponse { ok: true }))
}

/// Accepts `book_id` either form-encoded or as a JSON body.
pub async fn handle_remove_from_shelf(
    Extension(library): Extension<Arc<Library>>,
    request: Request,
) -> Result<Json<ShelfUpdateResponse>, ApiError> {
    let user = UserIdentity::from_headers(request.headers());
    let book_id = required_book_id(read_shelf_request(request).await)?;

    tracing::debug!("Removing {} from shelf of {}", book_id, user.username);
    library
        .blocking(move |library| library.shelves.remove(&user.username, &book_id))
        .await
        .map_err(shelf_unavailable)?;

    Ok(Json(ShelfUpdateResponse { ok: true }))
}

/// Decodes the body by content type. An unreadable body carries no `book_id`.
async fn read_shelf_request(request: Request) -> ShelfRequest {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    let parsed = if is_form {
        Form::<ShelfRequest>::from_request(request, &())
            .await
            .map(|Form(req)| req)
            .map_err(|e| e.to_string())
    } else {
        Json::<ShelfRequest>::from_request(request, &())
            .await
            .map(|Json(req)| req)
            .map_err(|e| e.to_string())
    };

    parsed.unwrap_or_else(|e| {
        tracing::debug!("Unreadable shelf request body: {}", e);
        ShelfRequest::default()
    })
}

fn required_book_id(req: ShelfRequest) -> Result<String, ApiError> {
    req.book_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("missing book_id")),
            )
        })
}
