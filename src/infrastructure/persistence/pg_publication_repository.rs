//! PostgreSQL implementation of publication repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Content, ContentKind, Link, NewContent, NewPost, Post};
use crate::domain::repositories::PublicationRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::pg_link_repository::LinkRow;
use crate::utils::db_error::is_foreign_key_violation;

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: i64,
    link_id: i64,
    kind: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for Content {
    type Error = AppError;

    fn try_from(r: ContentRow) -> Result<Self, Self::Error> {
        let kind: ContentKind = r.kind.parse().map_err(|_| {
            AppError::internal(
                "Stored content has an unregistered kind",
                json!({ "content_id": r.id, "kind": r.kind }),
            )
        })?;

        Ok(Content {
            id: r.id,
            link_id: r.link_id,
            kind,
            created_at: r.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    content_id: i64,
    created_at: DateTime<Utc>,
}

fn kind_tags(kinds: &[ContentKind]) -> Vec<String> {
    kinds.iter().map(|k| k.tag().to_string()).collect()
}

/// PostgreSQL repository for contents, posts and publication status.
///
/// Status queries are single `NOT EXISTS` statements over
/// `contents JOIN posts`, restricted to the kinds passed in.
pub struct PgPublicationRepository {
    pool: Arc<PgPool>,
}

impl PgPublicationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PublicationRepository for PgPublicationRepository {
    async fn create_content(&self, new_content: NewContent) -> Result<Content, AppError> {
        let row = sqlx::query_as::<_, ContentRow>(
            r#"
            INSERT INTO contents (link_id, kind)
            VALUES ($1, $2)
            RETURNING id, link_id, kind, created_at
            "#,
        )
        .bind(new_content.link_id)
        .bind(new_content.kind.tag())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found("Link not found", json!({ "id": new_content.link_id }))
            } else {
                e.into()
            }
        })?;

        row.try_into()
    }

    async fn record_post(&self, new_post: NewPost) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (content_id)
            VALUES ($1)
            RETURNING id, content_id, created_at
            "#,
        )
        .bind(new_post.content_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found("Content not found", json!({ "id": new_post.content_id }))
            } else {
                e.into()
            }
        })?;

        Ok(Post {
            id: row.id,
            content_id: row.content_id,
            created_at: row.created_at,
        })
    }

    async fn is_unposted(
        &self,
        link_id: i64,
        kinds: &[ContentKind],
    ) -> Result<Option<bool>, AppError> {
        let unposted = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT NOT EXISTS (
                SELECT 1
                FROM contents c
                JOIN posts p ON p.content_id = c.id
                WHERE c.link_id = l.id
                  AND c.kind = ANY($2)
            )
            FROM links l
            WHERE l.id = $1
            "#,
        )
        .bind(link_id)
        .bind(kind_tags(kinds))
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(unposted)
    }

    async fn unposted(&self, kinds: &[ContentKind]) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT l.id, l.url, l.title, l.summary, l.submitted_by, l.created_at, l.updated_at
            FROM links l
            WHERE NOT EXISTS (
                SELECT 1
                FROM contents c
                JOIN posts p ON p.content_id = c.id
                WHERE c.link_id = l.id
                  AND c.kind = ANY($1)
            )
            ORDER BY l.id
            "#,
        )
        .bind(kind_tags(kinds))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }
}
