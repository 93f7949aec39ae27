//! Per-channel content and the posts recorded against it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;

/// Channel a piece of content is prepared for.
///
/// Adding a channel means adding a variant here and listing it in
/// [`ContentKind::ALL`]. Status queries iterate the registered kinds and
/// need no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Twitter,
    Facebook,
}

impl ContentKind {
    /// Every known kind, in registration order.
    pub const ALL: [ContentKind; 2] = [ContentKind::Twitter, ContentKind::Facebook];

    /// Tag stored in the `contents.kind` column.
    pub fn tag(self) -> &'static str {
        match self {
            ContentKind::Twitter => "twitter",
            ContentKind::Facebook => "facebook",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Twitter => "Twitter",
            ContentKind::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ContentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ValidationError::UnknownContentKind(tag.to_string()))
    }
}

/// A link prepared for one channel. Does not by itself mean published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub id: i64,
    pub link_id: i64,
    pub kind: ContentKind,
    pub created_at: DateTime<Utc>,
}

/// A confirmed publication of a [`Content`] on its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub content_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContent {
    pub link_id: i64,
    pub kind: ContentKind,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub content_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!("twitter".parse::<ContentKind>().unwrap(), ContentKind::Twitter);
        assert_eq!(" Facebook ".parse::<ContentKind>().unwrap(), ContentKind::Facebook);
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "myspace".parse::<ContentKind>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownContentKind(tag) if tag == "myspace"));
    }

    #[test]
    fn test_tags_are_unique() {
        let mut tags: Vec<_> = ContentKind::ALL.iter().map(|k| k.tag()).collect();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), ContentKind::ALL.len());
    }

    #[test]
    fn test_serializes_as_tag() {
        let json = serde_json::to_string(&ContentKind::Facebook).unwrap();
        assert_eq!(json, "\"facebook\"");
    }
}
