//! Restaurant Aggregate
//!
//! A restaurant document together with its embedded reviews. This is the
//! unit of consistency: every review change goes through these methods and
//! leaves `average_rating` consistent with the review collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{rating, Author, DomainError, Photo, Review, ReviewRequest};

/// Restaurant Aggregate
///
/// Document fields the review logic does not interpret (cuisine type,
/// address, opening hours, ...) are kept in `details` so a whole-document
/// save writes them back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    id: String,

    #[serde(default)]
    name: String,

    #[serde(default)]
    reviews: Vec<Review>,

    #[serde(default)]
    average_rating: f64,

    #[serde(flatten)]
    details: Map<String, Value>,

    /// Store-managed version, 0 until first persisted
    #[serde(skip)]
    version: i64,
}

impl Restaurant {
    // =========================================================================
    // Restaurant::register()
    // =========================================================================

    /// Create a new, never persisted restaurant with no reviews
    pub fn register(id: impl Into<String>, name: impl Into<String>, details: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reviews: Vec::new(),
            average_rating: 0.0,
            details,
            version: 0,
        }
    }

    // =========================================================================
    // Restaurant::add_review()
    // =========================================================================

    /// Append a review by `author`, returning the new review's id.
    ///
    /// Each author may review a restaurant only once.
    pub fn add_review(
        &mut self,
        author: &Author,
        request: ReviewRequest,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        if self.reviews.iter().any(|r| r.is_written_by(&author.id)) {
            return Err(DomainError::already_reviewed());
        }

        let review_id = self.next_review_id();

        self.reviews.push(Review {
            id: review_id.clone(),
            content: request.content().to_string(),
            rating: request.rating(),
            photos: Photo::stamp_all(request.photo_ids(), now),
            date_posted: now,
            last_edited: now,
            written_by: author.clone(),
        });

        self.refresh_rating();
        Ok(review_id)
    }

    // =========================================================================
    // Restaurant::edit_review()
    // =========================================================================

    /// Replace content, rating and photos of a review written by `user`.
    ///
    /// Photos are rebuilt from the request and all stamped with `now`.
    pub fn edit_review(
        &mut self,
        user: &Author,
        review_id: &str,
        request: ReviewRequest,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id && r.is_written_by(&user.id))
            .ok_or_else(|| DomainError::ReviewNotFound(review_id.to_string()))?;

        if !review.is_editable_at(now) {
            return Err(DomainError::edit_window_expired());
        }

        review.content = request.content().to_string();
        review.rating = request.rating();
        review.photos = Photo::stamp_all(request.photo_ids(), now);
        // lastEdited never precedes datePosted, even under clock skew
        review.last_edited = now.max(review.date_posted);

        self.refresh_rating();
        Ok(())
    }

    // =========================================================================
    // Restaurant::remove_review()
    // =========================================================================

    /// Remove the review with `review_id`. Returns whether anything was removed.
    pub fn remove_review(&mut self, review_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != review_id);
        self.refresh_rating();
        self.reviews.len() != before
    }

    fn refresh_rating(&mut self) {
        self.average_rating = rating::recompute(&self.reviews);
    }

    fn next_review_id(&self) -> String {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if self.review(&candidate).is_none() {
                return candidate;
            }
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review(&self, review_id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == review_id)
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Set the version the store holds this document at
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }
}

// =========================================================================
// Restaurant unit tests
// =========================================================================
