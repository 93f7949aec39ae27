//! Link submission, deduplication and lookup service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, LinkSubmission, NewLink};
use crate::domain::repositories::{LINKS_URL_CONSTRAINT, LinkRepository};
use crate::error::{AppError, ValidationError};

/// Service for submitting and retrieving links.
///
/// Uniqueness of `url` is enforced by the repository at the point of write.
/// The pre-check in [`Self::submit`] only produces a friendlier error early;
/// a write that loses a race is reported the same way.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Submits a URL, creating a new link.
    ///
    /// The URL is trimmed before it is checked and stored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingUrl`] if the URL is blank.
    ///
    /// Returns [`ValidationError::DuplicateUrl`] if a link with the same URL
    /// exists, whether found by the pre-check or by the storage constraint
    /// rejecting a concurrent insert. The error carries the winning link.
    ///
    /// Returns [`AppError::StorageUnavailable`] if the store can't be reached.
    pub async fn submit(&self, submission: LinkSubmission) -> Result<Link, AppError> {
        let url = submission.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingUrl.into());
        }

        if let Some(existing_link) = self.find_conflicting(url).await? {
            debug!(link_id = existing_link.id, url, "duplicate url rejected");
            return Err(AppError::duplicate_url(existing_link));
        }

        let new_link = NewLink {
            url: url.to_string(),
            title: submission.title,
            summary: submission.summary,
            submitted_by: submission.submitted_by,
        };

        match self.link_repository.create(new_link).await {
            Ok(link) => {
                info!(link_id = link.id, url = %link.url, "link submitted");
                Ok(link)
            }
            Err(err) if err.is_unique_violation_on(LINKS_URL_CONSTRAINT) => {
                warn!(url, "concurrent submission already stored this url");
                match self.link_repository.find_by_url(url).await? {
                    Some(winner) => Err(AppError::duplicate_url(winner)),
                    // The winner was deleted before we could read it back.
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the existing link that owns `url`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_conflicting(&self, url: &str) -> Result<Option<Link>, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(None);
        }
        self.link_repository.find_by_url(url).await
    }

    /// Returns true if `url` has already been submitted.
    pub async fn is_duplicate(&self, url: &str) -> Result<bool, AppError> {
        Ok(self.find_conflicting(url).await?.is_some())
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Returns the display name of the link with this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn display_name(&self, id: i64) -> Result<String, AppError> {
        let link = self.get_link(id).await?;
        Ok(link.display_name().to_string())
    }

    /// Lists links ordered by id. Out-of-range pagination is clamped.
    pub async fn list_links(&self, page: i64, page_size: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository
            .list(page.max(1), page_size.clamp(1, 1000))
            .await
    }

    /// Deletes a link, cascading to its contents, posts and favorites.
    ///
    /// The URL can be submitted again afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete(id).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }
        info!(link_id = id, "link deleted");
        Ok(())
    }
}
