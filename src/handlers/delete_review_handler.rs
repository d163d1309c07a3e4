//! Delete Review Handler
//!
//! Removes a review from a restaurant. Deleting an unknown review id is a
//! no-op, so the call is idempotent.

use std::sync::Arc;

use crate::domain::OperationContext;
use crate::error::AppError;
use crate::store::RestaurantStore;

use super::{load_restaurant, DeleteReviewCommand};

/// Handler for review deletion
pub struct DeleteReviewHandler {
    store: Arc<dyn RestaurantStore>,
}

impl DeleteReviewHandler {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    /// Execute the delete review command
    pub async fn execute(
        &self,
        command: DeleteReviewCommand,
        context: &OperationContext,
    ) -> Result<(), AppError> {
        let mut restaurant = load_restaurant(self.store.as_ref(), &command.restaurant_id).await?;

        let removed = restaurant.remove_review(&command.review_id);

        // Saved even when nothing was removed: the rating is recomputed
        // and persisted after every delete.
        let saved = self.store.save(restaurant).await?;

        if removed {
            tracing::info!(
                restaurant_id = %saved.id(),
                review_id = %command.review_id,
                requested_by = ?context.request_user_id,
                average_rating = saved.average_rating(),
                correlation_id = ?context.correlation_id,
                "Review deleted"
            );
        } else {
            tracing::debug!(
                restaurant_id = %saved.id(),
                review_id = %command.review_id,
                "Delete of unknown review ignored"
            );
        }

        Ok(())
    }
}
