//! Publication status across every registered channel.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{Content, ContentKind, Link, NewContent, NewPost, Post};
use crate::domain::registry::ContentRegistry;
use crate::domain::repositories::PublicationRepository;
use crate::error::{AppError, ValidationError};

/// Answers "is this link posted anywhere" and "which links are unposted".
///
/// A link is posted as soon as one post exists through any of its content on
/// any registered channel. Partial publication counts as posted.
pub struct PublicationService<P: PublicationRepository> {
    repository: Arc<P>,
    registry: ContentRegistry,
}

impl<P: PublicationRepository> PublicationService<P> {
    /// Creates a service aggregating over every known content kind.
    pub fn new(repository: Arc<P>) -> Self {
        Self::with_registry(repository, ContentRegistry::default())
    }

    pub fn with_registry(repository: Arc<P>, registry: ContentRegistry) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// Channels the status is aggregated over, in registration order.
    pub fn kinds(&self) -> &[ContentKind] {
        self.registry.kinds()
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Returns true if any content of `kind` belonging to the link has a post.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownContentKind`] if `kind` is not registered.
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn has_post(&self, link_id: i64, kind: ContentKind) -> Result<bool, AppError> {
        self.ensure_registered(kind)?;
        let unposted = self.status(link_id, &[kind]).await?;
        Ok(!unposted)
    }

    /// Returns true if the link has no post on any registered channel.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn is_unposted(&self, link_id: i64) -> Result<bool, AppError> {
        self.status(link_id, self.registry.kinds()).await
    }

    /// Lists, ordered by id, every link with no post on any registered channel.
    pub async fn unposted(&self) -> Result<Vec<Link>, AppError> {
        let links = self.repository.unposted(self.registry.kinds()).await?;
        debug!(count = links.len(), "unposted links");
        Ok(links)
    }

    /// Lists, ordered by id, every link with no post on one channel.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownContentKind`] if `kind` is not registered.
    pub async fn unposted_on(&self, kind: ContentKind) -> Result<Vec<Link>, AppError> {
        self.ensure_registered(kind)?;
        self.repository.unposted(&[kind]).await
    }

    /// Records that a link has been prepared for a channel.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownContentKind`] if `kind` is not registered.
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn create_content(
        &self,
        link_id: i64,
        kind: ContentKind,
    ) -> Result<Content, AppError> {
        self.ensure_registered(kind)?;
        let content = self
            .repository
            .create_content(NewContent { link_id, kind })
            .await?;
        info!(content_id = content.id, link_id, kind = %kind, "content created");
        Ok(content)
    }

    /// Records a confirmed publication of a content item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the content does not exist.
    pub async fn record_post(&self, content_id: i64) -> Result<Post, AppError> {
        let post = self.repository.record_post(NewPost { content_id }).await?;
        info!(post_id = post.id, content_id, "post recorded");
        Ok(post)
    }

    async fn status(&self, link_id: i64, kinds: &[ContentKind]) -> Result<bool, AppError> {
        self.repository
            .is_unposted(link_id, kinds)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))
    }

    fn ensure_registered(&self, kind: ContentKind) -> Result<(), ValidationError> {
        if self.registry.contains(kind) {
            Ok(())
        } else {
            Err(ValidationError::UnknownContentKind(kind.tag().to_string()))
        }
    }
}
