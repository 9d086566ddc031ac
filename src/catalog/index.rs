//! Catalog Index Reconstruction
//!
//! Replays a `RecordLog` into a fresh, ordered list of `CatalogEntry` values.
//! Reconstruction is tolerant: a corrupt or partial line is skipped, never fatal.

use super::log::RecordLog;
use super::types::{CatalogEntry, RawRecord};
use crate::config::STORAGE_DIR_NAME;
use crate::error::{CatalogError, Result};

use std::io;

/// Namespace for ids synthesized for records that carry none.
const LEGACY_ID_NAMESPACE: uuid::Uuid =
    uuid::Uuid::from_u128(0x6b1c_3f0e_9a2d_4e57_8c41_d2a7_5f90_e3b8);

/// Parses the line at zero-based position `line_no` of the log.
///
/// Returns `None` for blank lines and `Some(Err(MalformedRecord))` for lines that are not
/// a JSON object. A missing id is derived from the position and content of the line, so
/// the same log always yields the same ids. Synthesized ids are not written back.
pub fn parse_line(line_no: usize, line: &str) -> Option<Result<CatalogEntry>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let record = decode_record(line);
    Some(record.map(|raw| normalize_record(raw, || synthesized_id(line_no, line))))
}

fn synthesized_id(line_no: usize, line: &str) -> String {
    let name = format!("{}:{}", line_no, line);
    uuid::Uuid::new_v5(&LEGACY_ID_NAMESPACE, name.as_bytes()).to_string()
}

fn decode_record(line: &str) -> Result<RawRecord> {
    let malformed = |reason: String| CatalogError::MalformedRecord { reason };

    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| malformed(e.to_string()))?;
    // Structs also deserialize from JSON arrays; only objects are records.
    if !value.is_object() {
        return Err(malformed("record is not a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

fn normalize_record(raw: RawRecord, fallback_id: impl FnOnce() -> String) -> CatalogEntry {
    let id = raw.id.filter(|id| !id.is_empty()).unwrap_or_else(fallback_id);

    let keywords = raw.keywords.map(|kw| kw.normalize()).unwrap_or_default();

    let file_path = raw
        .file_path
        .filter(|path| !path.is_empty())
        .or_else(|| {
            raw.filename
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(storage_path)
        });

    CatalogEntry {
        id,
        filename: raw.filename,
        file_path,
        title: raw.title,
        author: raw.author,
        genre: raw.genre,
        keywords,
        uploader: raw.uploader,
        timestamp: raw.timestamp,
    }
}

/// Relative path of a stored artifact, e.g. `books/dune.epub`.
pub fn storage_path(filename: &str) -> String {
    format!("{}/{}", STORAGE_DIR_NAME, filename)
}

/// Rebuilds the whole catalog from `log`, preserving log order.
pub fn rebuild(log: &RecordLog) -> Result<Vec<CatalogEntry>> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in log.read_all()?.enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::debug!("Skipping non UTF-8 line {} in record log", line_no + 1);
                skipped += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!(
                    "Stopped reading {} at line {}: {}",
                    log.path().display(),
                    line_no + 1,
                    e
                );
                break;
            }
        };

        match parse_line(line_no, &line) {
            Some(Ok(entry)) => entries.push(entry),
            Some(Err(e)) => {
                tracing::debug!("Skipping line {} in record log: {}", line_no + 1, e);
                skipped += 1;
            }
            None => {}
        }
    }

    if skipped > 0 {
        tracing::warn!(
            "Rebuilt catalog with {} entries, skipped {} malformed lines",
            entries.len(),
            skipped
        );
    }

    Ok(entries)
}

/// First entry carrying `id`.
pub fn find_by_id(entries: &[CatalogEntry], id: &str) -> Option<CatalogEntry> {
    entries.iter().find(|entry| entry.id == id).cloned()
}

/// Rebuilds the catalog and looks up `id`, reporting absence as `NotFound`.
pub fn get_by_id(log: &RecordLog, id: &str) -> Result<CatalogEntry> {
    let entries = rebuild(log)?;
    find_by_id(&entries, id).ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
}
