//! Repository trait for the generic favorites relation.

use crate::domain::entities::ItemRef;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for `(item, user)` favorite pairs.
///
/// The relation is keyed by [`ItemRef`], so any [`crate::domain::entities::Favoritable`]
/// entity can be stored without this trait knowing about it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Records a favorite. Recording the same pair twice is a no-op.
    async fn add(&self, item: ItemRef, user_id: i64) -> Result<(), AppError>;

    /// Removes a favorite. Returns `Ok(false)` if the pair was not recorded.
    async fn remove(&self, item: ItemRef, user_id: i64) -> Result<bool, AppError>;

    async fn exists(&self, item: ItemRef, user_id: i64) -> Result<bool, AppError>;

    /// Counts users who favorited `item`.
    async fn count(&self, item: ItemRef) -> Result<i64, AppError>;
}
