use super::types::{BookSubmission, Payload};
use crate::catalog::types::{CatalogEntry, KeywordsField};
use crate::error::{CatalogError, ErrorResponse};
use crate::identity::{Capability, UserIdentity};
use crate::library::Library;

use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use std::sync::Arc;

/// Multipart part carrying the artifact.
pub const FILE_FIELD: &str = "bookFile";

/// A parsed upload form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<(String, Vec<u8>)>,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub keywords: String,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, String> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
            let name = field.name().unwrap_or_default().to_string();
            if name == FILE_FIELD {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                form.file = Some((filename, bytes.to_vec()));
                continue;
            }

            let value = field.text().await.map_err(|e| e.to_string())?;
            match name.as_str() {
                "title" => form.title = value,
                "author" => form.author = value,
                "genre" => form.genre = value,
                "keywords" => form.keywords = value,
                _ => tracing::debug!("Ignoring upload field {}", name),
            }
        }

        Ok(form)
    }
}

pub async fn handle_upload(
    Extension(library): Extension<Arc<Library>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CatalogEntry>), (StatusCode, Json<ErrorResponse>)> {
    let uploader = UserIdentity::from_headers(&headers);
    if !uploader.can(Capability::Upload) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("upload not permitted")),
        ));
    }

    let form = UploadForm::read(multipart).await.map_err(|e| {
        tracing::warn!("Rejected malformed upload: {}", e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e)))
    })?;

    store_upload(library, form, uploader).await
}

/// Runs ingestion for an already parsed form.
pub async fn store_upload(
    library: Arc<Library>,
    form: UploadForm,
    uploader: UserIdentity,
) -> Result<(StatusCode, Json<CatalogEntry>), (StatusCode, Json<ErrorResponse>)> {
    // An unnamed file part counts as no file.
    let Some((filename, bytes)) = form.file.filter(|(name, _)| !name.is_empty()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No file provided")),
        ));
    };

    let submission = BookSubmission {
        title: form.title,
        author: form.author,
        genre: form.genre,
        keywords: KeywordsField::Text(form.keywords),
    };

    let result = library
        .blocking(move |library| {
            library
                .ingestion()
                .ingest(Payload::Bytes(bytes), &filename, submission, &uploader)
        })
        .await;

    match result {
        Ok(entry) => Ok((StatusCode::CREATED, Json(entry))),
        Err(e) => {
            tracing::error!("Upload failed: {}", e);
            let (status, message) = match e {
                CatalogError::UnsupportedPayload(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                CatalogError::Task(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ingestion failed".to_string(),
                ),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            };
            Err((status, Json(ErrorResponse::new(message))))
        }
    }
}
