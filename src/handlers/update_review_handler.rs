//! Update Review Handler
//!
//! Edits a review inside its edit window. Only the author may edit.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{OperationContext, Review};
use crate::error::AppError;
use crate::store::RestaurantStore;

use super::{load_restaurant, UpdateReviewCommand};

/// Handler for review updates
pub struct UpdateReviewHandler {
    store: Arc<dyn RestaurantStore>,
}

impl UpdateReviewHandler {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    /// Execute the update review command
    pub async fn execute(
        &self,
        command: UpdateReviewCommand,
        context: &OperationContext,
    ) -> Result<Review, AppError> {
        let mut restaurant = load_restaurant(self.store.as_ref(), &command.restaurant_id).await?;

        restaurant.edit_review(
            &command.user,
            &command.review_id,
            command.request,
            Utc::now(),
        )?;

        let saved = self.store.save(restaurant).await?;

        let review = saved.review(&command.review_id).cloned().ok_or_else(|| {
            AppError::Internal(format!(
                "Updated review {} missing from saved restaurant {}",
                command.review_id,
                saved.id()
            ))
        })?;

        tracing::info!(
            restaurant_id = %saved.id(),
            review_id = %review.id,
            rating = review.rating,
            average_rating = saved.average_rating(),
            correlation_id = ?context.correlation_id,
            "Review updated"
        );

        Ok(review)
    }
}
