//! Repository trait for channel content, posts and publication status.

use crate::domain::entities::{Content, ContentKind, Link, NewContent, NewPost, Post};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for publication data.
///
/// Status queries take the kinds to aggregate over as an argument, so the
/// storage side never hard-codes the list of channels. Each status query is
/// a single statement and therefore reads a single snapshot.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPublicationRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Records that a link has been prepared for a channel.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    async fn create_content(&self, new_content: NewContent) -> Result<Content, AppError>;

    /// Records a confirmed publication of a content item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the content does not exist.
    async fn record_post(&self, new_post: NewPost) -> Result<Post, AppError>;

    /// Returns whether the link has no post through content of any of `kinds`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(true))` if the link exists and is unposted on every kind
    /// - `Ok(Some(false))` if at least one post exists
    /// - `Ok(None)` if the link does not exist
    async fn is_unposted(
        &self,
        link_id: i64,
        kinds: &[ContentKind],
    ) -> Result<Option<bool>, AppError>;

    /// Lists, ordered by id, every link with no post through content of any
    /// of `kinds`.
    async fn unposted(&self, kinds: &[ContentKind]) -> Result<Vec<Link>, AppError>;
}
