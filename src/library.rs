//! Shared request context.
//!
//! `Library` holds only the locations of the Record Log, the artifact storage and the
//! shelves file. Every request derives its catalog from the log itself. Handlers reach the
//! files only through `Library::blocking`, which keeps file I/O off the async workers.

use crate::catalog::index::rebuild;
use crate::catalog::log::RecordLog;
use crate::catalog::types::CatalogEntry;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::ingestion::service::IngestionService;
use crate::shelf::store::ShelfStore;

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Library {
    pub log: RecordLog,
    pub storage_dir: PathBuf,
    pub shelves: ShelfStore,
}

impl Library {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            log: RecordLog::new(config.record_log_path()),
            storage_dir: config.storage_dir(),
            shelves: ShelfStore::new(config.shelves_path()),
        }
    }

    pub fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        rebuild(&self.log)
    }

    pub fn ingestion(&self) -> IngestionService {
        IngestionService::new(self.log.clone(), self.storage_dir.clone())
    }

    /// Runs `work` against this library on the blocking thread pool.
    pub async fn blocking<T, F>(self: &Arc<Self>, work: F) -> Result<T>
    where
        F: FnOnce(&Library) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let library = Arc::clone(self);
        tokio::task::spawn_blocking(move || work(&library))
            .await
            .map_err(|e| CatalogError::Task(e.to_string()))?
    }
}
