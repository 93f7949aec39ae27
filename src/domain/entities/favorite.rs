//! Favoriting capability shared by any entity with a stable identity.

use std::fmt;

/// Reference to a favorite target: a type tag plus the entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemRef {
    pub item_type: &'static str,
    pub item_id: i64,
}

impl ItemRef {
    pub fn new(item_type: &'static str, item_id: i64) -> Self {
        Self { item_type, item_id }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.item_type, self.item_id)
    }
}

/// Anything that users can favorite.
///
/// Implementors supply a type tag and their id; the favorites store never
/// needs to know the concrete entity.
pub trait Favoritable {
    const ITEM_TYPE: &'static str;

    fn item_id(&self) -> i64;

    fn item_ref(&self) -> ItemRef {
        ItemRef::new(Self::ITEM_TYPE, self.item_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ref_display() {
        assert_eq!(ItemRef::new("link", 12).to_string(), "link#12");
    }
}
