//! Create Review Handler
//!
//! Posts a new review into a restaurant document.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{OperationContext, Review};
use crate::error::AppError;
use crate::store::RestaurantStore;

use super::{load_restaurant, CreateReviewCommand};

/// Handler for review creation
pub struct CreateReviewHandler {
    store: Arc<dyn RestaurantStore>,
}

impl CreateReviewHandler {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    /// Execute the create review command
    pub async fn execute(
        &self,
        command: CreateReviewCommand,
        context: &OperationContext,
    ) -> Result<Review, AppError> {
        let mut restaurant = load_restaurant(self.store.as_ref(), &command.restaurant_id).await?;

        let review_id = restaurant.add_review(&command.author, command.request, Utc::now())?;

        let saved = self.store.save(restaurant).await?;

        // Locate by the id we just assigned, never by timestamp
        let review = saved.review(&review_id).cloned().ok_or_else(|| {
            AppError::Internal(format!(
                "Created review {} missing from saved restaurant {}",
                review_id,
                saved.id()
            ))
        })?;

        tracing::info!(
            restaurant_id = %saved.id(),
            review_id = %review.id,
            author_id = %review.written_by.id,
            rating = review.rating,
            average_rating = saved.average_rating(),
            correlation_id = ?context.correlation_id,
            "Review created"
        );

        Ok(review)
    }
}
