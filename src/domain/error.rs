//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Why a review create/update was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewNotAllowedReason {
    /// The author already has a review on this restaurant
    AlreadyReviewed,
    /// The edit window after posting has passed
    EditWindowExpired,
}

impl fmt::Display for ReviewNotAllowedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewNotAllowedReason::AlreadyReviewed => {
                write!(f, "user has already reviewed this restaurant")
            }
            ReviewNotAllowedReason::EditWindowExpired => write!(
                f,
                "review can no longer be edited ({}-hour limit exceeded)",
                super::review::EDIT_WINDOW_HOURS
            ),
        }
    }
}

/// Domain-specific errors
///
/// Business rule violations raised by the restaurant aggregate and the
/// request validation. Independent of the web and storage layers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// No review with this id written by the requesting user
    #[error("Review not found: {0}")]
    ReviewNotFound(String),

    #[error("Review not allowed: {0}")]
    ReviewNotAllowed(ReviewNotAllowedReason),

    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DomainError {
    pub fn already_reviewed() -> Self {
        Self::ReviewNotAllowed(ReviewNotAllowedReason::AlreadyReviewed)
    }

    pub fn edit_window_expired() -> Self {
        Self::ReviewNotAllowed(ReviewNotAllowedReason::EditWindowExpired)
    }
}
