//! PostgreSQL implementation of `RestaurantStore`.
//!
//! Each restaurant is one JSONB document in the `restaurants` table, with the
//! version kept in its own column for the conditional write.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RestaurantStore, StoreError};
use crate::aggregate::Restaurant;

/// Restaurant store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgRestaurantStore {
    pool: PgPool,
}

impl PgRestaurantStore {
    /// Create a new PgRestaurantStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode(document: serde_json::Value, version: i64) -> Result<Restaurant, StoreError> {
        let restaurant: Restaurant = serde_json::from_value(document)?;
        Ok(restaurant.with_version(version))
    }

    /// Version currently stored for a restaurant (0 when absent)
    async fn current_version(&self, restaurant_id: &str) -> Result<i64, StoreError> {
        let version: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT version FROM restaurants WHERE id = $1
            "#,
        )
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(version.unwrap_or(0))
    }

    // =========================================================================
    // insert (version 0 -> 1)
    // =========================================================================

    async fn insert(
        &self,
        restaurant: &Restaurant,
        document: serde_json::Value,
    ) -> Result<Option<(serde_json::Value, i64)>, StoreError> {
        let row: Option<(serde_json::Value, i64)> = sqlx::query_as(
            r#"
            INSERT INTO restaurants (id, document, version)
            VALUES ($1, $2, 1)
            ON CONFLICT (id) DO NOTHING
            RETURNING document, version
            "#,
        )
        .bind(restaurant.id())
        .bind(document)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // =========================================================================
    // replace (conditional on expected version)
    // =========================================================================

    async fn replace(
        &self,
        restaurant: &Restaurant,
        document: serde_json::Value,
    ) -> Result<Option<(serde_json::Value, i64)>, StoreError> {
        let row: Option<(serde_json::Value, i64)> = sqlx::query_as(
            r#"
            UPDATE restaurants
            SET document = $3, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING document, version
            "#,
        )
        .bind(restaurant.id())
        .bind(restaurant.version())
        .bind(document)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl RestaurantStore for PgRestaurantStore {
    async fn find_by_id(&self, restaurant_id: &str) -> Result<Option<Restaurant>, StoreError> {
        let row: Option<(serde_json::Value, i64)> = sqlx::query_as(
            r#"
            SELECT document, version
            FROM restaurants
            WHERE id = $1
            "#,
        )
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(document, version)| Self::decode(document, version))
            .transpose()
    }

    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError> {
        let document = serde_json::to_value(&restaurant)?;
        let expected = restaurant.version();

        let row = if expected == 0 {
            self.insert(&restaurant, document).await?
        } else {
            self.replace(&restaurant, document).await?
        };

        match row {
            Some((document, version)) => {
                tracing::debug!(
                    restaurant_id = %restaurant.id(),
                    version,
                    "Restaurant document saved"
                );
                Self::decode(document, version)
            }
            None => {
                let actual = self.current_version(restaurant.id()).await?;
                tracing::warn!(
                    restaurant_id = %restaurant.id(),
                    expected,
                    actual,
                    "Conditional write rejected: restaurant modified concurrently"
                );
                Err(StoreError::VersionConflict {
                    restaurant_id: restaurant.id().to_string(),
                    expected,
                    actual,
                })
            }
        }
    }
}
