//! Command Handlers module
//!
//! Handlers that orchestrate review operations: load the restaurant
//! aggregate, apply one change, save the whole document back.

mod commands;
mod create_review_handler;
mod delete_review_handler;
mod restaurant_handler;
mod review_queries;
mod update_review_handler;

#[cfg(test)]
mod tests;

pub use commands::*;
pub use create_review_handler::CreateReviewHandler;
pub use delete_review_handler::DeleteReviewHandler;
pub use restaurant_handler::CreateRestaurantHandler;
pub use review_queries::ReviewQueries;
pub use update_review_handler::UpdateReviewHandler;

use crate::aggregate::Restaurant;
use crate::domain::DomainError;
use crate::error::AppError;
use crate::store::RestaurantStore;

/// Load a restaurant fresh from the store or fail with `RestaurantNotFound`
pub(crate) async fn load_restaurant(
    store: &dyn RestaurantStore,
    restaurant_id: &str,
) -> Result<Restaurant, AppError> {
    store
        .find_by_id(restaurant_id)
        .await?
        .ok_or_else(|| DomainError::RestaurantNotFound(restaurant_id.to_string()).into())
}
