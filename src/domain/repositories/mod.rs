//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link storage with URL uniqueness
//! - [`PublicationRepository`] - Channel content, posts and publication status
//! - [`FavoriteRepository`] - Generic `(item, user)` favorites
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod favorite_repository;
pub mod link_repository;
pub mod publication_repository;

pub use favorite_repository::FavoriteRepository;
pub use link_repository::{LINKS_URL_CONSTRAINT, LinkRepository};
pub use publication_repository::PublicationRepository;

#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use publication_repository::MockPublicationRepository;
