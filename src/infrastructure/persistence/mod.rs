//! Link repository implementations.
//!
//! # Repositories
//!
//! - [`MemoryLinkRepository`] - process memory, lost on restart
//! - [`FileLinkRepository`] - single JSON file
//! - [`PgLinkRepository`] - PostgreSQL via SQLx

pub mod file_link_repository;
pub mod link_index;
pub mod memory_link_repository;
pub mod pg_link_repository;

pub use file_link_repository::FileLinkRepository;
pub use link_index::LinkIndex;
pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
