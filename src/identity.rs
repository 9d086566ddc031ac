//! User Identity
//!
//! A reader and an uploader are the same kind of user with a different set of
//! capabilities, so identity is a plain record and capabilities are checked by value.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

pub const ANONYMOUS: &str = "anonymous";

/// Header the session layer in front of this service sets to the signed-in username.
pub const USERNAME_HEADER: &str = "x-username";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Keep books on a personal shelf.
    Borrow,
    /// Add books to the catalog.
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    pub capabilities: Vec<Capability>,
}

impl UserIdentity {
    /// A regular member: can both borrow and upload.
    pub fn member(username: impl Into<String>) -> Self {
        let username = username.into();
        let username = if username.trim().is_empty() {
            ANONYMOUS.to_string()
        } else {
            username.trim().to_string()
        };

        Self {
            username,
            capabilities: vec![Capability::Borrow, Capability::Upload],
        }
    }

    pub fn anonymous() -> Self {
        Self::member(ANONYMOUS)
    }

    pub fn reader(username: impl Into<String>) -> Self {
        Self {
            capabilities: vec![Capability::Borrow],
            ..Self::member(username)
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Resolves the caller from request headers, defaulting to `anonymous`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(USERNAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(Self::member)
            .unwrap_or_else(Self::anonymous)
    }
}
