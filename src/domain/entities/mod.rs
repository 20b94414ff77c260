//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without storage concerns.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`NewLink`] - A link about to be inserted
//! - [`Stats`] - Aggregate counters derived from stored links

pub mod link;
pub mod stats;

pub use link::{Link, NewLink};
pub use stats::Stats;
