//! Service Configuration
//!
//! Resolves where the catalog lives on disk and which address the HTTP server binds to.
//! Command line flags take precedence over environment variables, which take precedence
//! over the built-in defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Name of the Record Log file inside the data directory.
pub const RECORD_LOG_FILE: &str = "bookvals.txt";
/// Name of the flat artifact storage directory inside the data directory.
/// Also used as the prefix of every `file_path`.
pub const STORAGE_DIR_NAME: &str = "books";
/// Name of the per-user bookshelf file inside the data directory.
pub const SHELVES_FILE: &str = "usershelves.json";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

pub const ENV_BIND: &str = "CATALOG_BIND";
pub const ENV_DATA_DIR: &str = "CATALOG_DATA_DIR";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
}

impl CatalogConfig {
    pub fn new(bind_addr: SocketAddr, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            data_dir: data_dir.into(),
        }
    }

    /// Builds the configuration from process arguments and the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(&args, |key| std::env::var(key).ok())
    }

    /// Parses `--bind <addr:port>` and `--data-dir <path>`, falling back to `env`.
    ///
    /// Unknown arguments are ignored.
    pub fn from_args<F>(args: &[String], env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut bind: Option<String> = None;
        let mut data_dir: Option<String> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    bind = Some(flag_value(args, i)?);
                    i += 2;
                }
                "--data-dir" => {
                    data_dir = Some(flag_value(args, i)?);
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        let bind = bind
            .or_else(|| env(ENV_BIND))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let data_dir = data_dir
            .or_else(|| env(ENV_DATA_DIR))
            .unwrap_or_else(|| ".".to_string());

        Ok(Self {
            bind_addr: bind.parse()?,
            data_dir: PathBuf::from(data_dir),
        })
    }

    pub fn record_log_path(&self) -> PathBuf {
        self.data_dir.join(RECORD_LOG_FILE)
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join(STORAGE_DIR_NAME)
    }

    pub fn shelves_path(&self) -> PathBuf {
        self.data_dir.join(SHELVES_FILE)
    }
}

fn flag_value(args: &[String], i: usize) -> anyhow::Result<String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("{} requires a value", args[i]))
}
