//! Review entity
//!
//! Reviews and their photos only ever exist embedded in a restaurant document.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Author;

/// How long after posting the author may still edit a review
pub const EDIT_WINDOW_HOURS: i64 = 48;

/// Photo attached to a review (or a restaurant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub url: String,
    pub upload_date: DateTime<Utc>,
}

impl Photo {
    pub fn new(url: impl Into<String>, upload_date: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            upload_date,
        }
    }

    /// Build photos from uploaded photo identifiers, all stamped with `now`
    pub fn stamp_all(photo_ids: &[String], now: DateTime<Utc>) -> Vec<Photo> {
        photo_ids.iter().map(|url| Photo::new(url.clone(), now)).collect()
    }
}

/// A review embedded in a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub content: String,
    pub rating: u8,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub date_posted: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
    pub written_by: Author,
}

impl Review {
    pub fn is_written_by(&self, author_id: &str) -> bool {
        self.written_by.id == author_id
    }

    /// Last instant at which the review may still be edited
    pub fn edit_deadline(&self) -> DateTime<Utc> {
        self.date_posted + Duration::hours(EDIT_WINDOW_HOURS)
    }

    pub fn is_editable_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.edit_deadline()
    }
}
