//! JSON file implementation of link repository.
//!
//! The whole dataset is kept as a JSON array:
//!
//! ```json
//! [
//!   {
//!     "uuid": "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d",
//!     "short_url": "aee7dad94e",
//!     "original_url": "http://a.example",
//!     "user_uuid": "u1",
//!     "is_deleted": false
//!   }
//! ]
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use super::link_index::LinkIndex;
use crate::domain::entities::{Link, NewLink, Stats};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// On-disk shape of a link.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLink {
    uuid: String,
    short_url: String,
    original_url: String,
    #[serde(default)]
    user_uuid: String,
    #[serde(default)]
    is_deleted: bool,
}

impl From<StoredLink> for Link {
    fn from(stored: StoredLink) -> Self {
        Link::new(
            stored.uuid,
            stored.short_url,
            stored.original_url,
            stored.user_uuid,
            stored.is_deleted,
        )
    }
}

impl From<&Link> for StoredLink {
    fn from(link: &Link) -> Self {
        Self {
            uuid: link.id.clone(),
            short_url: link.code.clone(),
            original_url: link.original_url.clone(),
            user_uuid: link.owner_id.clone(),
            is_deleted: link.is_deleted,
        }
    }
}

/// Repository persisting links to a single JSON file.
///
/// The file is read once on [`open`](Self::open) and rewritten on every
/// mutation. Writes go to a sibling temp file that is renamed over the target,
/// and the in-memory index only changes after the rename succeeds.
pub struct FileLinkRepository {
    path: PathBuf,
    index: Mutex<LinkIndex>,
}

impl FileLinkRepository {
    /// Opens the repository, loading existing links from `path`.
    ///
    /// A missing or empty file yields an empty repository.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the file cannot be read or is not a
    /// valid link array.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let links = load(&path).await?;
        tracing::info!(path = %path.display(), links = links.len(), "File storage loaded");

        Ok(Self {
            path,
            index: Mutex::new(LinkIndex::from_links(links)),
        })
    }

    /// Applies `change` to a copy of the index, persists it and swaps it in.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut LinkIndex) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut guard = self.index.lock().await;
        let mut next = guard.clone();
        let value = change(&mut next)?;

        persist(&self.path, next.links()).await?;
        *guard = next;
        Ok(value)
    }
}

#[async_trait]
impl LinkRepository for FileLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.mutate(|index| index.insert(new_link)).await
    }

    async fn create_batch(&self, new_links: Vec<NewLink>) -> Result<(), AppError> {
        self.mutate(|index| index.insert_batch(new_links)).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.index.lock().await.find_by_code(code).cloned())
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .index
            .lock()
            .await
            .find_by_original_url(original_url)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        Ok(self.index.lock().await.list_by_owner(owner_id))
    }

    async fn delete_batch(&self, codes: &[String], owner_id: &str) -> Result<u64, AppError> {
        self.mutate(|index| Ok(index.delete_batch(codes, owner_id)))
            .await
    }

    async fn stats(&self) -> Result<Stats, AppError> {
        Ok(self.index.lock().await.stats())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::metadata(dir)
                .await
                .map_err(|e| io_error("Storage directory unavailable", &self.path, e))?;
        }
        Ok(())
    }
}

async fn load(path: &Path) -> Result<Vec<Link>, AppError> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error("Failed to read storage file", path, e)),
    };

    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let stored: Vec<StoredLink> = serde_json::from_slice(&data).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Storage file is corrupt");
        AppError::internal(
            "Failed to parse storage file",
            json!({ "path": path.display().to_string() }),
        )
    })?;

    Ok(stored.into_iter().map(Link::from).collect())
}

async fn persist(path: &Path, links: &[Link]) -> Result<(), AppError> {
    let stored: Vec<StoredLink> = links.iter().map(StoredLink::from).collect();
    let data = serde_json::to_vec(&stored).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize links");
        AppError::internal("Failed to serialize links", json!({}))
    })?;

    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, &data)
        .await
        .map_err(|e| io_error("Failed to write storage file", &tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| io_error("Failed to replace storage file", path, e))?;

    Ok(())
}

fn io_error(message: &str, path: &Path, e: std::io::Error) -> AppError {
    tracing::error!(path = %path.display(), error = %e, "{}", message);
    AppError::internal(message, json!({ "path": path.display().to_string() }))
}
