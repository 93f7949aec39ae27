//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Name of the storage constraint that keeps `links.url` unique.
///
/// Implementations report a duplicate insert as
/// [`AppError::Conflict`] carrying this constraint name.
pub const LINKS_URL_CONSTRAINT: &str = "links_url_key";

/// Repository interface for managing links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link beneath the `url` uniqueness constraint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with constraint [`LINKS_URL_CONSTRAINT`]
    /// if another link already owns the URL, including one inserted
    /// concurrently after the caller's pre-check.
    ///
    /// Returns [`AppError::StorageUnavailable`] if the store can't be reached.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds the link that owns exactly this URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, AppError>;

    /// Lists links ordered by id.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<Link>, AppError>;

    /// Hard-deletes a link together with its contents, posts and favorites.
    ///
    /// Returns `Ok(false)` if no link has this id. The URL becomes free for
    /// a new submission once this returns `Ok(true)`.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
