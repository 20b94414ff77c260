//! In-memory implementation of link repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::link_index::LinkIndex;
use crate::domain::entities::{Link, NewLink, Stats};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Repository keeping every link in process memory.
///
/// Contents are lost on restart. Writers take the lock exclusively, which
/// makes create-if-absent atomic.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    index: RwLock<LinkIndex>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.index.write().await.insert(new_link)
    }

    async fn create_batch(&self, new_links: Vec<NewLink>) -> Result<(), AppError> {
        self.index.write().await.insert_batch(new_links)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.index.read().await.find_by_code(code).cloned())
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .index
            .read()
            .await
            .find_by_original_url(original_url)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        Ok(self.index.read().await.list_by_owner(owner_id))
    }

    async fn delete_batch(&self, codes: &[String], owner_id: &str) -> Result<u64, AppError> {
        Ok(self.index.write().await.delete_batch(codes, owner_id))
    }

    async fn stats(&self) -> Result<Stats, AppError> {
        Ok(self.index.read().await.stats())
    }
}
