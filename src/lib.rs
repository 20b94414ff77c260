//! # urlshrt
//!
//! A URL shortener with deterministic short codes, per-user ownership and
//! soft deletion, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link entities and the storage contract
//! - **Application Layer** ([`application`]) - Link lifecycle service
//! - **Infrastructure Layer** ([`infrastructure`]) - Memory, file and PostgreSQL stores
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Storage
//!
//! The store is chosen at startup: PostgreSQL when `DATABASE_DSN` is set,
//! a JSON file when `FILE_STORAGE_PATH` is set, memory otherwise.
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:8080"
//! export FILE_STORAGE_PATH="/tmp/urls.json"   # optional
//!
//! cargo run -- -a localhost:8080
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables and flags via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        BatchEntry, BatchShortened, LinkService, ShortenOutcome, UserLink,
    };
    pub use crate::domain::entities::{Link, NewLink, Stats};
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{
        FileLinkRepository, MemoryLinkRepository, PgLinkRepository,
    };
    pub use crate::state::AppState;
}
