//! Bookshelf Module
//!
//! Per-user reading lists. A shelf stores book ids only; listing a shelf resolves them
//! against a freshly rebuilt catalog, so books missing from the catalog drop out.

pub mod handlers;
pub mod store;
pub mod types;
