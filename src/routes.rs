//! HTTP routing table.

use crate::ingestion::handlers::handle_upload;
use crate::library::Library;
use crate::search::handlers::{handle_get_book, handle_search};
use crate::shelf::handlers::{
    handle_add_to_shelf, handle_check_shelf, handle_list_shelf, handle_remove_from_shelf,
};

use axum::extract::{DefaultBodyLimit, Extension};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// Largest accepted request body, uploads included.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Builds the router with all routes and the shared `Library`.
pub fn build_router(library: Arc<Library>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/books", get(handle_search))
        .route("/api/book/:id", get(handle_get_book))
        .route("/upload", post(handle_upload))
        .route("/api/bookshelf", get(handle_list_shelf))
        .route("/api/bookshelf/check/:id", get(handle_check_shelf))
        .route("/api/bookshelf/add", post(handle_add_to_shelf))
        .route("/api/bookshelf/remove", post(handle_remove_from_shelf))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(Extension(library))
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
