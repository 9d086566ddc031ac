//! Record Log
//!
//! Append-only JSON Lines file holding one catalog record per line.
//! Appending is the only mutation. A missing file reads as an empty log.

use super::types::CatalogEntry;
use crate::error::Result;

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RecordLog {
    path: PathBuf,
}

impl RecordLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `entry` as a single line.
    ///
    /// The record and its newline go out in one `write_all` on an append-mode handle,
    /// so concurrent writers interleave at line granularity.
    pub fn append(&self, entry: &CatalogEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        tracing::debug!("Appended record {} to {}", entry.id, self.path.display());
        Ok(())
    }

    /// Returns a lazy iterator over the raw lines of the log.
    ///
    /// A line that is not valid UTF-8 comes back as an `InvalidData` error; the iterator
    /// keeps going after it.
    pub fn read_all(&self) -> Result<RawLines> {
        match File::open(&self.path) {
            Ok(file) => Ok(RawLines {
                inner: Some(BufReader::new(file).split(b'\n')),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RawLines { inner: None }),
            Err(e) => Err(e.into()),
        }
    }
}

/// Lines of a `RecordLog`, without the trailing `\n` / `\r\n`.
pub struct RawLines {
    inner: Option<io::Split<BufReader<File>>>,
}

impl Iterator for RawLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = match self.inner.as_mut()?.next()? {
            Ok(bytes) => bytes,
            Err(e) => {
                // A read error is not recoverable mid-file.
                self.inner = None;
                return Some(Err(e));
            }
        };

        Some(
            String::from_utf8(bytes)
                .map(|mut line| {
                    if line.ends_with('\r') {
                        line.pop();
                    }
                    line
                })
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
        )
    }
}
