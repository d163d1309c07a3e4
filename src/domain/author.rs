//! Author snapshot
//!
//! Identity fields of a reviewer, captured by value when the request arrives.

use serde::{Deserialize, Serialize};

/// Snapshot of the identity that wrote a review.
///
/// Stored inside the review itself, so later profile changes never rewrite
/// past reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Subject identifier from the upstream identity provider
    pub id: String,

    /// Preferred username
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub given_name: String,

    #[serde(default)]
    pub family_name: String,
}

impl Author {
    /// Create an author with only an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: String::new(),
            given_name: String::new(),
            family_name: String::new(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_name(mut self, given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        self.given_name = given_name.into();
        self.family_name = family_name.into();
        self
    }
}
