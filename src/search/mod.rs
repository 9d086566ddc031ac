//! Search Service Module
//!
//! Answers catalog queries against a freshly rebuilt catalog.
//!
//! ## Responsibilities
//! - **Filtering**: Case-insensitive substring match on author and genre.
//! - **Tokenization**: Splitting free-text keyword queries on whitespace and commas.
//! - **Ranking**: Counting matched tokens per book and ordering by that count.
//! - **API**: Exposing search and lookup by id over HTTP.
//!
//! ## Submodules
//! - **`engine`**: Filtering and scoring.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`tokenizer`**: Query normalization.
//! - **`types`**: Query inputs and response DTOs.

pub mod engine;
pub mod handlers;
pub mod tokenizer;
pub mod types;
