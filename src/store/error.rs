//! Restaurant Store Errors
//!
//! Error types for aggregate store operations.

/// Errors that can occur in the restaurant store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Conditional write lost against a concurrent save
    #[error("Version conflict for restaurant {restaurant_id}: expected version {expected}, found {actual}")]
    VersionConflict {
        restaurant_id: String,
        expected: i64,
        actual: i64,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Check if this error is a version conflict
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, StoreError::VersionConflict { .. })
    }
}
