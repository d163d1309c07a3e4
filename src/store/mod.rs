//! Restaurant Store module
//!
//! Persistence of whole restaurant documents.
//!
//! Every save is a conditional whole-document replace: it only succeeds if
//! the stored version still equals the version the aggregate was loaded at.
//! A lost race surfaces as `StoreError::VersionConflict`; nothing retries.

mod error;
mod memory;
mod postgres;

pub use error::StoreError;
pub use memory::InMemoryRestaurantStore;
pub use postgres::PgRestaurantStore;

use async_trait::async_trait;

use crate::aggregate::Restaurant;

/// Aggregate store for restaurant documents
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Load a restaurant, returning None if not found.
    async fn find_by_id(&self, restaurant_id: &str) -> Result<Option<Restaurant>, StoreError>;

    /// Replace the whole document.
    ///
    /// A version 0 restaurant is inserted; otherwise the stored version must
    /// equal `restaurant.version()`. Returns the document as stored, at its
    /// new version.
    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError>;
}
