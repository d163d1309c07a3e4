//! Domain module
//!
//! Core domain types and pure business logic.

pub mod author;
pub mod context;
pub mod error;
pub mod paging;
pub mod rating;
pub mod request;
pub mod review;

pub use author::Author;
pub use context::OperationContext;
pub use error::{DomainError, FieldError, ReviewNotAllowedReason};
pub use paging::{Page, PageRequest, Sort, SortDirection, SortField};
pub use request::{ReviewDraft, ReviewRequest};
pub use review::{Photo, Review, EDIT_WINDOW_HOURS};
