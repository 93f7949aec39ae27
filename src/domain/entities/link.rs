//! Link entity representing a submitted, shareable URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::favorite::Favoritable;

/// A submitted URL with optional title and summary.
///
/// `url` is globally unique across all links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Opaque id of the submitting user, owned by the identity layer.
    pub submitted_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        url: String,
        title: Option<String>,
        summary: Option<String>,
        submitted_by: Option<i64>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            title,
            summary,
            submitted_by,
            created_at,
            updated_at,
        }
    }

    /// Name shown for the link: the title unless it is missing or blank,
    /// otherwise the URL.
    pub fn display_name(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.url,
        }
    }
}

impl Favoritable for Link {
    const ITEM_TYPE: &'static str = "link";

    fn item_id(&self) -> i64 {
        self.id
    }
}

/// Caller input for submitting a link.
#[derive(Debug, Clone, Default)]
pub struct LinkSubmission {
    pub url: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub submitted_by: Option<i64>,
}

impl LinkSubmission {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn submitted_by(mut self, user_id: i64) -> Self {
        self.submitted_by = Some(user_id);
        self
    }
}

/// Validated data for inserting a link row.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub url: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub submitted_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_with_title(title: Option<&str>) -> Link {
        Link::new(
            1,
            "http://example.com".to_string(),
            title.map(str::to_string),
            None,
            None,
            Utc::now(),
            Utc::now(),
        )
    }

    #[test]
    fn test_display_name_uses_title_when_present() {
        let link = link_with_title(Some("This is the title"));
        assert_eq!(link.display_name(), "This is the title");
    }

    #[test]
    fn test_display_name_falls_back_to_url_for_empty_title() {
        let link = link_with_title(Some(""));
        assert_eq!(link.display_name(), "http://example.com");
    }

    #[test]
    fn test_display_name_falls_back_to_url_for_blank_title() {
        let link = link_with_title(Some("   "));
        assert_eq!(link.display_name(), "http://example.com");
    }

    #[test]
    fn test_display_name_falls_back_to_url_without_title() {
        let link = link_with_title(None);
        assert_eq!(link.display_name(), "http://example.com");
    }

    #[test]
    fn test_link_is_favoritable() {
        let link = link_with_title(None);
        let item = link.item_ref();

        assert_eq!(item.item_type, "link");
        assert_eq!(item.item_id, 1);
    }

    #[test]
    fn test_submission_builder() {
        let submission = LinkSubmission::new("https://rust-lang.org")
            .with_title("Rust")
            .with_summary("A language")
            .submitted_by(42);

        assert_eq!(submission.url, "https://rust-lang.org");
        assert_eq!(submission.title.as_deref(), Some("Rust"));
        assert_eq!(submission.summary.as_deref(), Some("A language"));
        assert_eq!(submission.submitted_by, Some(42));
    }
}
