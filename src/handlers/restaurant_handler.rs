//! Restaurant Creation Handler
//!
//! Registers a restaurant document with an empty review collection.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::aggregate::Restaurant;
use crate::domain::{DomainError, FieldError, OperationContext, Photo};
use crate::error::AppError;
use crate::store::RestaurantStore;

use super::CreateRestaurantCommand;

/// Handler for restaurant creation
pub struct CreateRestaurantHandler {
    store: Arc<dyn RestaurantStore>,
}

impl CreateRestaurantHandler {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    /// Execute the create restaurant command
    pub async fn execute(
        &self,
        command: CreateRestaurantCommand,
        context: &OperationContext,
    ) -> Result<Restaurant, AppError> {
        if command.name.trim().is_empty() {
            return Err(DomainError::Validation(vec![FieldError::new(
                "name",
                "must not be blank",
            )])
            .into());
        }

        let mut details = command.details();
        let photos = Photo::stamp_all(&command.photo_ids, Utc::now());
        let photos = serde_json::to_value(photos).map_err(|e| AppError::Internal(e.to_string()))?;
        details.insert("photos".to_string(), photos);

        let restaurant = Restaurant::register(Uuid::new_v4().to_string(), command.name, details);
        let saved = self.store.save(restaurant).await?;

        tracing::info!(
            restaurant_id = %saved.id(),
            name = %saved.name(),
            correlation_id = ?context.correlation_id,
            "Restaurant created"
        );

        Ok(saved)
    }
}
