use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Username -> saved book ids, in the order they were added.
pub type Shelves = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ShelfRequest {
    pub book_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShelfCheckResponse {
    pub in_shelf: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShelfUpdateResponse {
    pub ok: bool,
}
