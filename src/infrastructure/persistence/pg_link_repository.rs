//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Favoritable, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape shared by every query that returns links.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub submitted_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.url,
            r.title,
            r.summary,
            r.submitted_by,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// URL uniqueness is enforced by the `links_url_key` constraint; a losing
/// concurrent insert surfaces as [`AppError::Conflict`] naming it.
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
            INSERT INTO links (url, title, summary, submitted_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, url, title, summary, submitted_by, created_at, updated_at
            "#,
        )
        .bind(&new_link.url)
        .bind(&new_link.title)
        .bind(&new_link.summary)
        .bind(new_link.submitted_by)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, url, title, summary, submitted_by, created_at, updated_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, url, title, summary, submitted_by, created_at, updated_at
            FROM links
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<Link>, AppError> {
        let offset = page.saturating_sub(1).max(0).saturating_mul(page_size);

        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, url, title, summary, submitted_by, created_at, updated_at
            FROM links
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        // Favorites are polymorphic and have no foreign key to cascade from.
        sqlx::query("DELETE FROM favorites WHERE item_type = $1 AND item_id = $2")
            .bind(Link::ITEM_TYPE)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // contents and posts go with ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
