//! Catalog Store Module
//!
//! The persisted source of truth for every uploaded book and its transient in-memory view.
//!
//! ## Core Concepts
//! - **Record Log**: An append-only JSON Lines file. Each line is one self-contained
//!   catalog record; lines are never edited or removed.
//! - **Reconstruction**: The catalog index is rebuilt from scratch by replaying the log on
//!   every read. Corrupt lines are skipped, legacy fields are normalized.
//! - **No cache**: Nothing survives between requests, so there is nothing to invalidate.

pub mod index;
pub mod log;
pub mod types;
