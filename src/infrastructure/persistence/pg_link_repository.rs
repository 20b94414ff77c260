//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, Stats};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape of the `urls` table.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    uuid: String,
    short: String,
    original: String,
    user_uuid: String,
    is_deleted: bool,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.uuid,
            row.short,
            row.original,
            row.user_uuid,
            row.is_deleted,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness is enforced by the `urls_short_key` and `urls_original_key`
/// constraints; violations surface as [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO urls (uuid, short, original, user_uuid)
            VALUES ($1, $2, $3, $4)
            RETURNING uuid, short, original, user_uuid, is_deleted
            "#,
        )
        .bind(&new_link.id)
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .bind(&new_link.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn create_batch(&self, new_links: Vec<NewLink>) -> Result<(), AppError> {
        if new_links.is_empty() {
            return Ok(());
        }

        let mut ids = Vec::with_capacity(new_links.len());
        let mut codes = Vec::with_capacity(new_links.len());
        let mut originals = Vec::with_capacity(new_links.len());
        let mut owners = Vec::with_capacity(new_links.len());
        for link in new_links {
            ids.push(link.id);
            codes.push(link.code);
            originals.push(link.original_url);
            owners.push(link.owner_id);
        }

        sqlx::query(
            r#"
            INSERT INTO urls (uuid, short, original, user_uuid)
            SELECT * FROM UNNEST($1::varchar[], $2::varchar[], $3::text[], $4::varchar[])
            "#,
        )
        .bind(&ids)
        .bind(&codes)
        .bind(&originals)
        .bind(&owners)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT uuid, short, original, user_uuid, is_deleted
            FROM urls
            WHERE short = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT uuid, short, original, user_uuid, is_deleted
            FROM urls
            WHERE original = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT uuid, short, original, user_uuid, is_deleted
            FROM urls
            WHERE user_uuid = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete_batch(&self, codes: &[String], owner_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET is_deleted = TRUE
            WHERE user_uuid = $1 AND short = ANY($2) AND NOT is_deleted
            "#,
        )
        .bind(owner_id)
        .bind(codes)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn stats(&self) -> Result<Stats, AppError> {
        let (url_count, user_count) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE short <> ''),
                COUNT(DISTINCT user_uuid) FILTER (WHERE user_uuid <> '')
            FROM urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Stats {
            url_count,
            user_count,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
