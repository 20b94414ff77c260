//! Infrastructure layer for external integrations.
//!
//! Implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - memory, file and PostgreSQL link repositories

pub mod persistence;
