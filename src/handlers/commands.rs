//! Command definitions
//!
//! Commands represent intentions to change a restaurant's reviews.

use serde_json::{Map, Value};

use crate::domain::{Author, ReviewRequest};

// =========================================================================
// CreateReviewCommand
// =========================================================================

/// Command to post a review on a restaurant
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub restaurant_id: String,
    pub author: Author,
    pub request: ReviewRequest,
}

impl CreateReviewCommand {
    pub fn new(restaurant_id: impl Into<String>, author: Author, request: ReviewRequest) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            author,
            request,
        }
    }
}

// =========================================================================
// UpdateReviewCommand
// =========================================================================

/// Command to edit one's own review
#[derive(Debug, Clone)]
pub struct UpdateReviewCommand {
    pub restaurant_id: String,
    pub review_id: String,
    /// Must be the review's author
    pub user: Author,
    pub request: ReviewRequest,
}

impl UpdateReviewCommand {
    pub fn new(
        restaurant_id: impl Into<String>,
        review_id: impl Into<String>,
        user: Author,
        request: ReviewRequest,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            review_id: review_id.into(),
            user,
            request,
        }
    }
}

// =========================================================================
// DeleteReviewCommand
// =========================================================================

/// Command to remove a review
#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub restaurant_id: String,
    pub review_id: String,
}

impl DeleteReviewCommand {
    pub fn new(restaurant_id: impl Into<String>, review_id: impl Into<String>) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            review_id: review_id.into(),
        }
    }
}

// =========================================================================
// CreateRestaurantCommand
// =========================================================================

/// Command to register a restaurant
#[derive(Debug, Clone, Default)]
pub struct CreateRestaurantCommand {
    pub name: String,
    pub cuisine_type: Option<String>,
    pub contact_information: Option<String>,
    pub address: Option<Value>,
    pub operating_hours: Option<Value>,
    pub photo_ids: Vec<String>,
}

impl CreateRestaurantCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_cuisine_type(mut self, cuisine_type: impl Into<String>) -> Self {
        self.cuisine_type = Some(cuisine_type.into());
        self
    }

    /// Descriptive document fields, camelCase keyed, absent ones omitted
    pub(crate) fn details(&self) -> Map<String, Value> {
        let mut details = Map::new();
        if let Some(cuisine_type) = &self.cuisine_type {
            details.insert("cuisineType".to_string(), Value::String(cuisine_type.clone()));
        }
        if let Some(contact) = &self.contact_information {
            details.insert("contactInformation".to_string(), Value::String(contact.clone()));
        }
        if let Some(address) = &self.address {
            details.insert("address".to_string(), address.clone());
        }
        if let Some(hours) = &self.operating_hours {
            details.insert("operatingHours".to_string(), hours.clone());
        }
        details
    }
}
