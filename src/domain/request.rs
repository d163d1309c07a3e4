//! Review requests
//!
//! `ReviewDraft` is what arrives over the wire; `ReviewRequest` can only be
//! obtained by validating a draft, so handlers never see malformed input.

use serde::{Deserialize, Serialize};

use super::{DomainError, FieldError};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Unvalidated review payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub photo_ids: Option<Vec<String>>,
}

impl ReviewDraft {
    pub fn new(content: impl Into<String>, rating: i64) -> Self {
        Self {
            content: Some(content.into()),
            rating: Some(rating),
            photo_ids: None,
        }
    }

    pub fn with_photo_ids(mut self, photo_ids: Vec<String>) -> Self {
        self.photo_ids = Some(photo_ids);
        self
    }

    /// Validate every field, collecting all failures
    pub fn validate(self) -> Result<ReviewRequest, DomainError> {
        let mut errors = Vec::new();

        let content = match self.content {
            Some(content) if !content.trim().is_empty() => Some(content),
            _ => {
                errors.push(FieldError::new("content", "must not be blank"));
                None
            }
        };

        let rating = match self.rating {
            Some(rating) if (MIN_RATING..=MAX_RATING).contains(&rating) => Some(rating as u8),
            Some(_) => {
                errors.push(FieldError::new(
                    "rating",
                    format!("must be between {} and {}", MIN_RATING, MAX_RATING),
                ));
                None
            }
            None => {
                errors.push(FieldError::new("rating", "is required"));
                None
            }
        };

        let photo_ids = self.photo_ids.unwrap_or_default();
        for (idx, photo_id) in photo_ids.iter().enumerate() {
            if photo_id.trim().is_empty() {
                errors.push(FieldError::new(
                    format!("photoIds[{}]", idx),
                    "must not be blank",
                ));
            }
        }

        match (content, rating) {
            (Some(content), Some(rating)) if errors.is_empty() => Ok(ReviewRequest {
                content,
                rating,
                photo_ids,
            }),
            _ => Err(DomainError::Validation(errors)),
        }
    }
}

/// Validated review payload used by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    content: String,
    rating: u8,
    photo_ids: Vec<String>,
}

impl ReviewRequest {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn photo_ids(&self) -> &[String] {
        &self.photo_ids
    }
}
