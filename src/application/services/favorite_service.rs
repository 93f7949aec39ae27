//! Favoriting for any [`Favoritable`] entity.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::Favoritable;
use crate::domain::repositories::FavoriteRepository;
use crate::error::AppError;

/// Records and queries `(item, user)` favorites.
pub struct FavoriteService<F: FavoriteRepository> {
    repository: Arc<F>,
}

impl<F: FavoriteRepository> FavoriteService<F> {
    pub fn new(repository: Arc<F>) -> Self {
        Self { repository }
    }

    /// Marks `item` as favorited by `user_id`. Idempotent.
    pub async fn favorite<T: Favoritable + Sync>(
        &self,
        item: &T,
        user_id: i64,
    ) -> Result<(), AppError> {
        let item = item.item_ref();
        self.repository.add(item, user_id).await?;
        info!(%item, user_id, "favorite recorded");
        Ok(())
    }

    /// Removes the favorite. Returns false if there was none.
    pub async fn unfavorite<T: Favoritable + Sync>(
        &self,
        item: &T,
        user_id: i64,
    ) -> Result<bool, AppError> {
        self.repository.remove(item.item_ref(), user_id).await
    }

    pub async fn is_favorited_by<T: Favoritable + Sync>(
        &self,
        item: &T,
        user_id: i64,
    ) -> Result<bool, AppError> {
        self.repository.exists(item.item_ref(), user_id).await
    }

    pub async fn favorite_count<T: Favoritable + Sync>(&self, item: &T) -> Result<i64, AppError> {
        self.repository.count(item.item_ref()).await
    }
}
