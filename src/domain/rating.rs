//! Aggregate rating
//!
//! The restaurant's average rating is derived data. It is recomputed from the
//! embedded reviews after every structural change, never at read time.

use super::Review;

/// Mean rating of `reviews`, or `0.0` when there are none
pub fn recompute(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    sum as f64 / reviews.len() as f64
}
