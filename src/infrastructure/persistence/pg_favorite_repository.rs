//! PostgreSQL implementation of favorite repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ItemRef;
use crate::domain::repositories::FavoriteRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `favorites` relation.
///
/// The primary key `(item_type, item_id, user_id)` makes [`Self::add`]
/// idempotent via `ON CONFLICT DO NOTHING`.
pub struct PgFavoriteRepository {
    pool: Arc<PgPool>,
}

impl PgFavoriteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    async fn add(&self, item: ItemRef, user_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO favorites (item_type, item_id, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(item.item_type)
        .bind(item.item_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn remove(&self, item: ItemRef, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM favorites WHERE item_type = $1 AND item_id = $2 AND user_id = $3",
        )
        .bind(item.item_type)
        .bind(item.item_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, item: ItemRef, user_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM favorites
                WHERE item_type = $1 AND item_id = $2 AND user_id = $3
            )
            "#,
        )
        .bind(item.item_type)
        .bind(item.item_id)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn count(&self, item: ItemRef) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM favorites WHERE item_type = $1 AND item_id = $2",
        )
        .bind(item.item_type)
        .bind(item.item_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
