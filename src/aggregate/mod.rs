//! Aggregate module
//!
//! Aggregate roots. The restaurant is the only one; reviews live inside it.

pub mod restaurant;

pub use restaurant::Restaurant;
