//! Core domain entities.
//!
//! Entities are plain data structures. The only derived behaviour they carry
//! is presentation (e.g. [`Link::display_name`]) and the favoriting capability.
//!
//! # Entity Types
//!
//! - [`Link`] - A submitted URL, unique across the store
//! - [`Content`] - A link prepared for one channel ([`ContentKind`])
//! - [`Post`] - A confirmed publication of a content item
//! - [`ItemRef`] - Target of a favorite, produced by any [`Favoritable`]
//!
//! # Design Pattern
//!
//! Separate structs are used for creation:
//! - `LinkSubmission` - Raw caller input
//! - `NewLink`, `NewContent`, `NewPost` - Validated insert data

pub mod content;
pub mod favorite;
pub mod link;

pub use content::{Content, ContentKind, NewContent, NewPost, Post};
pub use favorite::{Favoritable, ItemRef};
pub use link::{Link, LinkSubmission, NewLink};
