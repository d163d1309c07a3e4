//! Review Queries
//!
//! Read-only lookups over restaurant documents. Nothing here writes.

use std::sync::Arc;

use crate::aggregate::Restaurant;
use crate::domain::{paging, Page, PageRequest, Review};
use crate::error::AppError;
use crate::store::RestaurantStore;

use super::load_restaurant;

/// Query side for restaurants and their reviews
#[derive(Clone)]
pub struct ReviewQueries {
    store: Arc<dyn RestaurantStore>,
}

impl ReviewQueries {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    /// Whole restaurant document
    pub async fn get_restaurant(&self, restaurant_id: &str) -> Result<Restaurant, AppError> {
        load_restaurant(self.store.as_ref(), restaurant_id).await
    }

    /// One page of a restaurant's reviews plus the total review count
    pub async fn list_reviews(
        &self,
        restaurant_id: &str,
        page_request: &PageRequest,
    ) -> Result<Page<Review>, AppError> {
        let restaurant = load_restaurant(self.store.as_ref(), restaurant_id).await?;
        Ok(paging::paginate(restaurant.reviews(), page_request))
    }

    /// A single review; `None` when the restaurant has no such review
    pub async fn get_restaurant_review(
        &self,
        restaurant_id: &str,
        review_id: &str,
    ) -> Result<Option<Review>, AppError> {
        let restaurant = load_restaurant(self.store.as_ref(), restaurant_id).await?;
        Ok(restaurant.review(review_id).cloned())
    }
}
