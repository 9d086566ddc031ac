//! Bookshelf persistence.
//!
//! All shelves live in one JSON object on disk. Every mutation reads the file, applies the
//! change and rewrites it in full; the last writer wins.

use super::types::Shelves;
use crate::error::Result;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ShelfStore {
    path: PathBuf,
}

impl ShelfStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every shelf. A missing or unreadable file is an empty set of shelves.
    pub fn load(&self) -> Shelves {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Shelves::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                return Shelves::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt shelves file {}: {}", self.path.display(), e);
            Shelves::new()
        })
    }

    fn save(&self, shelves: &Shelves) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(shelves)?)?;
        Ok(())
    }

    pub fn list(&self, username: &str) -> Vec<String> {
        self.load().remove(username).unwrap_or_default()
    }

    pub fn contains(&self, username: &str, book_id: &str) -> bool {
        self.load()
            .get(username)
            .is_some_and(|ids| ids.iter().any(|id| id == book_id))
    }

    /// Adds `book_id` to the end of the user's shelf unless it is already there.
    pub fn add(&self, username: &str, book_id: &str) -> Result<()> {
        let mut shelves = self.load();
        let ids = shelves.entry(username.to_string()).or_default();
        if !ids.iter().any(|id| id == book_id) {
            ids.push(book_id.to_string());
        }
        self.save(&shelves)
    }

    pub fn remove(&self, username: &str, book_id: &str) -> Result<()> {
        let mut shelves = self.load();
        let ids = shelves.entry(username.to_string()).or_default();
        ids.retain(|id| id != book_id);
        self.save(&shelves)
    }
}
