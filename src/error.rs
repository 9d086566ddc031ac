use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    // Ingestion errors
    #[error("unsupported payload: {0}")]
    UnsupportedPayload(String),

    #[error("ingestion failed: {reason}")]
    IngestionFailed { reason: String },

    // Record log errors
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("entry not found: {id}")]
    NotFound { id: String },

    #[error("background task failed: {0}")]
    Task(String),

    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn ingestion(reason: impl Into<String>) -> Self {
        Self::IngestionFailed {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// JSON body returned by HTTP handlers on failure.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
