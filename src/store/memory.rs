//! In-memory implementation of `RestaurantStore`.
//!
//! Keeps serialized documents in a `HashMap` behind a `RwLock`, so reads and
//! writes go through the same JSON round trip as the PostgreSQL store.
//! All state is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RestaurantStore, StoreError};
use crate::aggregate::Restaurant;

#[derive(Debug, Clone)]
struct StoredDocument {
    document: serde_json::Value,
    version: i64,
}

/// In-memory restaurant store.
#[derive(Debug, Default)]
pub struct InMemoryRestaurantStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl InMemoryRestaurantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored restaurants
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn decode(stored: &StoredDocument) -> Result<Restaurant, StoreError> {
    let restaurant: Restaurant = serde_json::from_value(stored.document.clone())?;
    Ok(restaurant.with_version(stored.version))
}

#[async_trait]
impl RestaurantStore for InMemoryRestaurantStore {
    async fn find_by_id(&self, restaurant_id: &str) -> Result<Option<Restaurant>, StoreError> {
        let documents = self.documents.read().await;
        documents.get(restaurant_id).map(decode).transpose()
    }

    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError> {
        let document = serde_json::to_value(&restaurant)?;
        let expected = restaurant.version();

        let mut documents = self.documents.write().await;
        let actual = documents
            .get(restaurant.id())
            .map(|stored| stored.version)
            .unwrap_or(0);

        if actual != expected {
            return Err(StoreError::VersionConflict {
                restaurant_id: restaurant.id().to_string(),
                expected,
                actual,
            });
        }

        let stored = StoredDocument {
            document,
            version: expected + 1,
        };
        let saved = decode(&stored)?;
        documents.insert(restaurant.id().to_string(), stored);

        tracing::debug!(
            restaurant_id = %saved.id(),
            version = saved.version(),
            "Restaurant document saved (in-memory)"
        );

        Ok(saved)
    }
}
