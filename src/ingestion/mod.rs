//! Ingestion Service Module
//!
//! Handles uploads of new books into the catalog.
//!
//! ## Workflow
//! 1. **Obtain**: Reads the payload fully (buffer, stream or local file copy).
//! 2. **Store**: Writes it under a sanitized, collision-free name in the storage directory.
//! 3. **Record**: Appends one catalog record to the Record Log.

pub mod handlers;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
