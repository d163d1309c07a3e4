//! Review paging
//!
//! In-memory sort and page slice over a restaurant's embedded reviews.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Review;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Review fields a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    DatePosted,
    Rating,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::DatePosted => "datePosted",
            SortField::Rating => "rating",
        }
    }

    fn compare(&self, a: &Review, b: &Review) -> Ordering {
        match self {
            SortField::DatePosted => a.date_posted.cmp(&b.date_posted),
            SortField::Rating => a.rating.cmp(&b.rating),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort property that is not one of the review fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort property: {0}")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "datePosted" => Ok(SortField::DatePosted),
            "rating" => Ok(SortField::Rating),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort specification; defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse `property[,asc|desc]`.
    ///
    /// An unknown property falls back to `datePosted` while keeping an
    /// explicit direction. A missing direction means descending.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(',').map(str::trim);

        let field: SortField = match parts.next().filter(|p| !p.is_empty()) {
            Some(property) => property.parse().unwrap_or_else(|e: UnknownSortField| {
                tracing::debug!("{}, falling back to {}", e, SortField::default());
                SortField::default()
            }),
            None => SortField::default(),
        };

        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };

        Self { field, direction }
    }

    fn compare(&self, a: &Review, b: &Review) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort: Sort::default(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the size of the whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }
}

/// Sort a copy of `reviews` and cut out the requested page
pub fn paginate(reviews: &[Review], request: &PageRequest) -> Page<Review> {
    let total = reviews.len();
    let start = request.offset();

    let content = if start >= total {
        Vec::new()
    } else {
        let mut sorted = reviews.to_vec();
        // sort_by is stable: equal keys keep their stored order
        sorted.sort_by(|a, b| request.sort.compare(a, b));
        let end = start.saturating_add(request.size).min(total);
        sorted.drain(start..end).collect()
    };

    Page {
        content,
        page: request.page,
        size: request.size,
        total,
    }
}
