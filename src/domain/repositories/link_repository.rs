//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink, Stats};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short links.
///
/// Uniqueness of `original_url` must be enforced atomically by the
/// implementation; [`crate::application::services::LinkService`] never
/// pre-checks before inserting.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process maps
/// - [`crate::infrastructure::persistence::FileLinkRepository`] - JSON file
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a link with the same original URL
    /// already exists. Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Inserts all links or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if any link clashes with a stored link or
    /// with another link of the same batch.
    async fn create_batch(&self, new_links: Vec<NewLink>) -> Result<(), AppError>;

    /// Finds a link by its short code, deleted or not.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its original URL, deleted or not.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link whose owner equals `owner_id`, in insertion order.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError>;

    /// Soft-deletes the links in `codes` owned by `owner_id`.
    ///
    /// Links owned by someone else are left untouched. Returns the number of
    /// links that went from live to deleted.
    async fn delete_batch(&self, codes: &[String], owner_id: &str) -> Result<u64, AppError>;

    /// Computes aggregate counters.
    async fn stats(&self) -> Result<Stats, AppError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
