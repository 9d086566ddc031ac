//! Ingestion Data Types
//!
//! Inputs accepted by the ingestion service: the artifact payload in any of its supported
//! shapes and the user-supplied metadata that goes into the catalog record.

use crate::catalog::types::KeywordsField;
use crate::error::{CatalogError, Result};

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

/// The bytes of an uploaded artifact.
pub enum Payload {
    /// An in-memory buffer.
    Bytes(Vec<u8>),
    /// A stream read to its end.
    Reader(Box<dyn Read + Send>),
    /// An existing file on the local filesystem to copy.
    Path(PathBuf),
}

impl Payload {
    /// Text content, stored as its UTF-8 encoding.
    pub fn text(text: impl Into<String>) -> Self {
        Payload::Bytes(text.into().into_bytes())
    }

    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        Payload::Reader(Box::new(reader))
    }

    /// Obtains the full payload in memory.
    ///
    /// A `Path` that does not name an existing regular file is `UnsupportedPayload`;
    /// any read failure is `IngestionFailed`.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Payload::Bytes(bytes) => Ok(bytes),
            Payload::Reader(mut reader) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|e| CatalogError::ingestion(format!("cannot read payload: {}", e)))?;
                Ok(bytes)
            }
            Payload::Path(path) => {
                if !path.is_file() {
                    return Err(CatalogError::UnsupportedPayload(format!(
                        "{} is not an existing file",
                        path.display()
                    )));
                }
                std::fs::read(&path).map_err(|e| {
                    CatalogError::ingestion(format!("cannot read {}: {}", path.display(), e))
                })
            }
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Bytes(bytes) => write!(f, "Payload::Bytes({} bytes)", bytes.len()),
            Payload::Reader(_) => write!(f, "Payload::Reader"),
            Payload::Path(path) => write!(f, "Payload::Path({})", path.display()),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<PathBuf> for Payload {
    fn from(path: PathBuf) -> Self {
        Payload::Path(path)
    }
}

/// Metadata submitted alongside an artifact.
#[derive(Debug, Clone)]
pub struct BookSubmission {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub keywords: KeywordsField,
}

impl BookSubmission {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        keywords: impl Into<KeywordsField>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            keywords: keywords.into(),
        }
    }
}

impl Default for BookSubmission {
    fn default() -> Self {
        Self::new("", "", "", "")
    }
}
