//! Link creation, resolution and lifecycle service.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewLink, Stats};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{derive_short_code, new_opaque_id};
use serde_json::json;

/// Default upper bound for a single batch delete.
pub const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of shortening a single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub short_url: String,
    /// True when the URL had been shortened before; `short_url` is the existing one.
    pub already_exists: bool,
}

/// One URL of a batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub original_url: String,
    pub correlation_id: String,
}

/// One shortened URL of a batch response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchShortened {
    pub short_url: String,
    pub correlation_id: String,
}

/// A live link owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLink {
    pub short_url: String,
    pub original_url: String,
}

/// Service orchestrating short link creation, resolution and deletion.
///
/// Holds no record state of its own: every call goes to the repository, and
/// uniqueness races between concurrent callers are settled by the repository's
/// atomic insert.
pub struct LinkService<R: LinkRepository + ?Sized> {
    link_repository: Arc<R>,
    base_url: String,
    delete_timeout: Duration,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    ///
    /// `base_url` prefixes every short URL; a trailing slash is ignored.
    pub fn new(link_repository: Arc<R>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            link_repository,
            base_url,
            delete_timeout: DEFAULT_DELETE_TIMEOUT,
        }
    }

    /// Overrides the batch delete timeout.
    pub fn with_delete_timeout(mut self, delete_timeout: Duration) -> Self {
        self.delete_timeout = delete_timeout;
        self
    }

    /// Shortens `original_url` on behalf of `owner_id`.
    ///
    /// Creation is idempotent: if the URL was shortened before, the existing
    /// short URL is returned with `already_exists = true` instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if identifier generation fails, the
    /// repository fails, or a conflicting link cannot be read back.
    pub async fn shorten(
        &self,
        original_url: &str,
        owner_id: &str,
    ) -> Result<ShortenOutcome, AppError> {
        let code = derive_short_code(original_url);
        let new_link = NewLink {
            id: new_opaque_id()?,
            code,
            original_url: original_url.to_string(),
            owner_id: owner_id.to_string(),
        };

        match self.link_repository.create(new_link).await {
            Ok(link) => Ok(ShortenOutcome {
                short_url: self.short_url(&link.code),
                already_exists: false,
            }),
            Err(e) if e.is_conflict() => {
                tracing::debug!(original_url, "URL already shortened");
                let existing = self
                    .link_repository
                    .find_by_original_url(original_url)
                    .await
                    .map_err(|e| internal("Failed to load existing link", e))?
                    .ok_or_else(|| {
                        tracing::error!(
                            original_url,
                            "Create conflicted but no link has this original URL"
                        );
                        AppError::internal(
                            "Short code is taken by another URL",
                            json!({ "original_url": original_url }),
                        )
                    })?;

                Ok(ShortenOutcome {
                    short_url: self.short_url(&existing.code),
                    already_exists: true,
                })
            }
            Err(e) => Err(internal("Failed to create link", e)),
        }
    }

    /// Shortens a batch of URLs in one repository call.
    ///
    /// Entries with an empty `correlation_id` are skipped. The result keeps the
    /// order of the retained entries. Unlike [`Self::shorten`] there is no
    /// conflict reconciliation: one already-shortened URL fails the batch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if identifier generation or the batch
    /// insert fails.
    pub async fn shorten_batch(
        &self,
        entries: Vec<BatchEntry>,
        owner_id: &str,
    ) -> Result<Vec<BatchShortened>, AppError> {
        let mut new_links = Vec::with_capacity(entries.len());
        let mut shortened = Vec::with_capacity(entries.len());

        for entry in entries {
            if entry.correlation_id.is_empty() {
                continue;
            }

            let code = derive_short_code(&entry.original_url);
            shortened.push(BatchShortened {
                short_url: self.short_url(&code),
                correlation_id: entry.correlation_id,
            });
            new_links.push(NewLink {
                id: new_opaque_id()?,
                code,
                original_url: entry.original_url,
                owner_id: owner_id.to_string(),
            });
        }

        if new_links.is_empty() {
            return Ok(shortened);
        }

        self.link_repository
            .create_batch(new_links)
            .await
            .map_err(|e| internal("Failed to create link batch", e))?;

        Ok(shortened)
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes, [`AppError::Gone`] for
    /// soft-deleted links and [`AppError::Internal`] on repository errors.
    pub async fn find_original(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await
            .map_err(|e| internal("Failed to load link", e))?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if link.is_deleted() {
            return Err(AppError::gone(
                "Short link has been deleted",
                json!({ "code": code }),
            ));
        }

        Ok(link.original_url)
    }

    /// Lists the live links owned by `owner_id`.
    ///
    /// An empty owner has no links.
    pub async fn user_links(&self, owner_id: &str) -> Result<Vec<UserLink>, AppError> {
        if owner_id.is_empty() {
            return Ok(Vec::new());
        }

        let links = self
            .link_repository
            .list_by_owner(owner_id)
            .await
            .map_err(|e| internal("Failed to list user links", e))?;

        Ok(links
            .into_iter()
            .filter(|link| !link.is_deleted())
            .map(|link| UserLink {
                short_url: self.short_url(&link.code),
                original_url: link.original_url,
            })
            .collect())
    }

    /// Soft-deletes the links in `codes` that belong to `owner_id`.
    ///
    /// Codes owned by other users are ignored. An empty owner deletes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the repository fails or does not
    /// finish within the delete timeout.
    pub async fn delete_batch(&self, codes: Vec<String>, owner_id: &str) -> Result<(), AppError> {
        if owner_id.is_empty() {
            tracing::warn!(codes = codes.len(), "Batch delete without owner ignored");
            return Ok(());
        }
        if codes.is_empty() {
            return Ok(());
        }

        let deleted = tokio::time::timeout(
            self.delete_timeout,
            self.link_repository.delete_batch(&codes, owner_id),
        )
        .await
        .map_err(|_| {
            tracing::error!(
                codes = codes.len(),
                timeout_ms = self.delete_timeout.as_millis() as u64,
                "Batch delete timed out"
            );
            AppError::internal("Batch delete timed out", json!({ "codes": codes.len() }))
        })?
        .map_err(|e| internal("Failed to delete links", e))?;

        tracing::debug!(requested = codes.len(), deleted, owner_id, "Links deleted");
        Ok(())
    }

    /// Returns service-wide counters.
    pub async fn stats(&self) -> Result<Stats, AppError> {
        self.link_repository
            .stats()
            .await
            .map_err(|e| internal("Failed to compute stats", e))
    }

    /// Checks that the underlying repository is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Generates a fresh opaque identity for an anonymous caller.
    pub fn issue_owner_id(&self) -> Result<String, AppError> {
        Ok(new_opaque_id()?)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

/// Collapses a repository error into [`AppError::Internal`].
fn internal(message: &str, e: AppError) -> AppError {
    match e {
        AppError::Internal { .. } => e,
        other => {
            tracing::error!(error = %other, "{}", message);
            AppError::internal(message, json!({ "reason": other.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;

    const BASE_URL: &str = "http://localhost:8080";

    fn create_test_link(code: &str, url: &str, owner: &str, is_deleted: bool) -> Link {
        Link::new(
            format!("id-{code}"),
            code.to_string(),
            url.to_string(),
            owner.to_string(),
            is_deleted,
        )
    }

    fn service(mock: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(mock), BASE_URL)
    }

    #[tokio::test]
    async fn test_shorten_fresh_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .withf(|new_link| {
                new_link.code == "aee7dad94e"
                    && new_link.original_url == "http://a.example"
                    && new_link.owner_id == "u1"
            })
            .times(1)
            .returning(|new_link| Ok(Link::from(new_link)));
        mock_link_repo.expect_find_by_original_url().times(0);

        let result = service(mock_link_repo)
            .shorten("http://a.example", "u1")
            .await
            .unwrap();

        assert_eq!(result.short_url, "http://localhost:8080/aee7dad94e");
        assert!(!result.already_exists);
    }

    #[tokio::test]
    async fn test_shorten_conflict_returns_existing() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("dup", json!({}))));

        let existing = create_test_link("aee7dad94e", "http://a.example", "u0", false);
        mock_link_repo
            .expect_find_by_original_url()
            .withf(|url| url == "http://a.example")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let result = service(mock_link_repo)
            .shorten("http://a.example", "u1")
            .await
            .unwrap();

        assert_eq!(result.short_url, "http://localhost:8080/aee7dad94e");
        assert!(result.already_exists);
    }

    #[tokio::test]
    async fn test_shorten_conflict_without_existing_link_is_internal() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .returning(|_| Err(AppError::conflict("dup", json!({}))));
        mock_link_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        let result = service(mock_link_repo)
            .shorten("http://a.example", "u1")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_shorten_conflict_lookup_failure_is_internal() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .returning(|_| Err(AppError::conflict("dup", json!({}))));
        mock_link_repo
            .expect_find_by_original_url()
            .returning(|_| Err(AppError::internal("db down", json!({}))));

        let result = service(mock_link_repo)
            .shorten("http://a.example", "u1")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_shorten_storage_error_is_internal() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .returning(|_| Err(AppError::not_found("weird", json!({}))));
        mock_link_repo.expect_find_by_original_url().times(0);

        let result = service(mock_link_repo)
            .shorten("http://a.example", "u1")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_shorten_batch_skips_empty_correlation_ids() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create_batch()
            .withf(|links| {
                links.len() == 2
                    && links[0].original_url == "https://one.example"
                    && links[1].original_url == "https://three.example"
                    && links.iter().all(|l| l.owner_id == "u1")
            })
            .times(1)
            .returning(|_| Ok(()));

        let entries = vec![
            BatchEntry {
                original_url: "https://one.example".to_string(),
                correlation_id: "1".to_string(),
            },
            BatchEntry {
                original_url: "https://two.example".to_string(),
                correlation_id: String::new(),
            },
            BatchEntry {
                original_url: "https://three.example".to_string(),
                correlation_id: "3".to_string(),
            },
        ];

        let result = service(mock_link_repo)
            .shorten_batch(entries, "u1")
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].correlation_id, "1");
        assert_eq!(
            result[0].short_url,
            format!("{BASE_URL}/{}", derive_short_code("https://one.example"))
        );
        assert_eq!(result[1].correlation_id, "3");
    }

    #[tokio::test]
    async fn test_shorten_batch_without_retained_entries_skips_repository() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create_batch().times(0);

        let entries = vec![BatchEntry {
            original_url: "https://one.example".to_string(),
            correlation_id: String::new(),
        }];

        let result = service(mock_link_repo)
            .shorten_batch(entries, "u1")
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_shorten_batch_conflict_is_internal() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create_batch()
            .returning(|_| Err(AppError::conflict("dup", json!({}))));

        let entries = vec![BatchEntry {
            original_url: "https://one.example".to_string(),
            correlation_id: "1".to_string(),
        }];

        let result = service(mock_link_repo).shorten_batch(entries, "u1").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_find_original_success() {
        let mut mock_link_repo = MockLinkRepository::new();
        let link = create_test_link("abc", "https://example.com", "u1", false);
        mock_link_repo
            .expect_find_by_code()
            .withf(|code| code == "abc")
            .returning(move |_| Ok(Some(link.clone())));

        let result = service(mock_link_repo).find_original("abc").await;

        assert_eq!(result.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_find_original_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_code()
            .returning(|_| Ok(None));

        let result = service(mock_link_repo).find_original("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_original_deleted_is_gone() {
        let mut mock_link_repo = MockLinkRepository::new();
        let link = create_test_link("abc", "https://example.com", "u1", true);
        mock_link_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(link.clone())));

        let result = service(mock_link_repo).find_original("abc").await;

        assert!(matches!(result.unwrap_err(), AppError::Gone { .. }));
    }

    #[tokio::test]
    async fn test_find_original_storage_error_is_internal() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_code()
            .returning(|_| Err(AppError::internal("db down", json!({}))));

        let result = service(mock_link_repo).find_original("abc").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_user_links_excludes_deleted() {
        let mut mock_link_repo = MockLinkRepository::new();
        let links = vec![
            create_test_link("c1", "https://one.example", "u1", false),
            create_test_link("c2", "https://two.example", "u1", true),
        ];
        mock_link_repo
            .expect_list_by_owner()
            .withf(|owner| owner == "u1")
            .returning(move |_| Ok(links.clone()));

        let result = service(mock_link_repo).user_links("u1").await.unwrap();

        assert_eq!(
            result,
            vec![UserLink {
                short_url: format!("{BASE_URL}/c1"),
                original_url: "https://one.example".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_user_links_empty_owner() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_list_by_owner().times(0);

        let result = service(mock_link_repo).user_links("").await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_delete_batch_passes_codes_and_owner() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_delete_batch()
            .withf(|codes, owner| {
                codes.len() == 2 && codes[0] == "c1" && codes[1] == "c2" && owner == "u1"
            })
            .times(1)
            .returning(|_, _| Ok(1));

        let result = service(mock_link_repo)
            .delete_batch(vec!["c1".to_string(), "c2".to_string()], "u1")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_batch_empty_owner_is_noop() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_delete_batch().times(0);

        let result = service(mock_link_repo)
            .delete_batch(vec!["c1".to_string()], "")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_batch_storage_error_is_internal() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_delete_batch()
            .returning(|_, _| Err(AppError::internal("db down", json!({}))));

        let result = service(mock_link_repo)
            .delete_batch(vec!["c1".to_string()], "u1")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_stats() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_stats().returning(|| {
            Ok(Stats {
                url_count: 3,
                user_count: 2,
            })
        });

        let stats = service(mock_link_repo).stats().await.unwrap();

        assert_eq!(stats.url_count, 3);
        assert_eq!(stats.user_count, 2);
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()), "https://s.example/");
        assert_eq!(service.short_url("abc"), "https://s.example/abc");
    }
}
