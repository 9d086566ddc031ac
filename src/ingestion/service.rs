//! Ingestion Service
//!
//! Stores an uploaded artifact in the flat storage directory and records it in the
//! Record Log. The log is only written after the artifact is safely on disk, and a failed
//! append removes the artifact again, so the two never disagree.

use super::types::{BookSubmission, Payload};
use crate::catalog::index::storage_path;
use crate::catalog::log::RecordLog;
use crate::catalog::types::CatalogEntry;
use crate::error::{CatalogError, Result};
use crate::identity::UserIdentity;

use chrono::{SecondsFormat, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Name used when the suggested name has no usable file name component.
pub const FALLBACK_FILENAME: &str = "upload";

#[derive(Debug, Clone)]
pub struct IngestionService {
    log: RecordLog,
    storage_dir: PathBuf,
}

impl IngestionService {
    pub fn new(log: RecordLog, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            log,
            storage_dir: storage_dir.into(),
        }
    }

    pub fn ingest(
        &self,
        payload: Payload,
        suggested_name: &str,
        submission: BookSubmission,
        uploader: &UserIdentity,
    ) -> Result<CatalogEntry> {
        let bytes = payload.into_bytes()?;

        fs::create_dir_all(&self.storage_dir).map_err(|e| {
            CatalogError::ingestion(format!(
                "cannot create storage directory {}: {}",
                self.storage_dir.display(),
                e
            ))
        })?;

        let save_name = sanitize_filename(suggested_name);
        let (filename, dest_path) = store_artifact(&self.storage_dir, &save_name, &bytes)
            .map_err(|e| CatalogError::ingestion(format!("cannot store {}: {}", save_name, e)))?;

        let entry = CatalogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            file_path: Some(storage_path(&filename)),
            filename: Some(filename),
            title: Some(submission.title),
            author: Some(submission.author),
            genre: Some(submission.genre),
            keywords: submission.keywords.normalize(),
            uploader: Some(uploader.username.clone()),
            timestamp: Some(now_iso8601()),
        };

        if let Err(e) = self.log.append(&entry) {
            tracing::error!("Failed to record {}: {}", dest_path.display(), e);
            discard_artifact(&dest_path);
            return Err(CatalogError::ingestion(format!("cannot append record: {}", e)));
        }

        tracing::info!(
            "Ingested {} as {} ({} bytes) for {}",
            suggested_name,
            entry.id,
            bytes.len(),
            uploader.username
        );
        Ok(entry)
    }
}

/// Reduces a client-supplied name to a bare file name.
///
/// Both `/` and `\` count as separators. `.`, `..` and empty names fall back to
/// `FALLBACK_FILENAME`.
pub fn sanitize_filename(suggested: &str) -> String {
    let base = suggested
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>();
    let base = base.trim();

    match base {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        name => name.to_string(),
    }
}

/// Splits `name` into stem and extension (including the dot).
///
/// Leading dots do not start an extension: `.profile` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].trim_start_matches('.').is_empty() => {
            (&name[..idx], &name[idx..])
        }
        _ => (name, ""),
    }
}

/// The `n`-th alternative for a taken name: `book.txt` -> `book_1.txt`.
pub fn collision_name(name: &str, n: usize) -> String {
    if n == 0 {
        return name.to_string();
    }
    let (stem, ext) = split_extension(name);
    format!("{}_{}{}", stem, n, ext)
}

/// Writes `bytes` under the first free name in the `collision_name` sequence.
fn store_artifact(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<(String, PathBuf)> {
    let (filename, path, mut file) = create_unique(dir, name)?;

    if let Err(e) = file.write_all(bytes).and_then(|_| file.sync_all()) {
        drop(file);
        discard_artifact(&path);
        return Err(e);
    }

    Ok((filename, path))
}

/// Removes an artifact that will not be recorded. Returns whether it is gone.
pub fn discard_artifact(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            tracing::warn!("Failed to remove artifact {}: {}", path.display(), e);
            false
        }
    }
}

fn create_unique(dir: &Path, name: &str) -> io::Result<(String, PathBuf, File)> {
    let mut n = 0;
    loop {
        let candidate = collision_name(name, n);
        let path = dir.join(&candidate);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((candidate, path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e),
        }
    }
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
