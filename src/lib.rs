//! Book Catalog Service Library
//!
//! Core of a small document library: users upload books with metadata and later find them
//! by author/genre filters or free-text keyword ranking. The binary (`main.rs`) wires these
//! modules into an HTTP server.
//!
//! ## Architecture Modules
//! - **`catalog`**: The append-only Record Log and the per-request reconstruction of the
//!   catalog from it. Corrupt lines are skipped, legacy fields normalized.
//! - **`ingestion`**: Stores uploaded artifacts under collision-free names and records them.
//! - **`search`**: Author/genre filtering and keyword relevance ranking.
//! - **`shelf`**: Per-user lists of saved books.
//! - **`identity`**: The calling user and what they are allowed to do.
//! - **`library`**: On-disk locations shared by all handlers.
//! - **`routes`**: The HTTP routing table.

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod ingestion;
pub mod library;
pub mod routes;
pub mod search;
pub mod shelf;
