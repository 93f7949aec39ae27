//! Registry of content kinds the publication status is aggregated over.

use crate::domain::entities::ContentKind;
use crate::error::ValidationError;

/// Ordered, duplicate-free set of registered content kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegistry {
    kinds: Vec<ContentKind>,
}

impl ContentRegistry {
    /// Builds a registry from `kinds`, keeping the first occurrence of each.
    pub fn new(kinds: impl IntoIterator<Item = ContentKind>) -> Self {
        let mut registered = Vec::new();
        for kind in kinds {
            if !registered.contains(&kind) {
                registered.push(kind);
            }
        }
        Self { kinds: registered }
    }

    pub fn kinds(&self) -> &[ContentKind] {
        &self.kinds
    }

    pub fn contains(&self, kind: ContentKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Parses a tag and checks that the kind is registered.
    pub fn parse(&self, tag: &str) -> Result<ContentKind, ValidationError> {
        let kind: ContentKind = tag.parse()?;
        if self.contains(kind) {
            Ok(kind)
        } else {
            Err(ValidationError::UnknownContentKind(tag.trim().to_string()))
        }
    }

    /// Tags of the registered kinds, in registration order.
    pub fn tags(&self) -> Vec<String> {
        self.kinds.iter().map(|k| k.tag().to_string()).collect()
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new(ContentKind::ALL)
    }
}
