//! Repository implementations.
//!
//! Concrete implementations of domain repository traits. The PostgreSQL
//! repositories use SQLx with runtime-bound parameters.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgPublicationRepository`] - Contents, posts and publication status queries
//! - [`PgFavoriteRepository`] - Generic favorites
//! - [`InMemoryStore`] - All three contracts over in-process maps

pub mod memory_store;
pub mod pg_favorite_repository;
pub mod pg_link_repository;
pub mod pg_publication_repository;

pub use memory_store::InMemoryStore;
pub use pg_favorite_repository::PgFavoriteRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_publication_repository::PgPublicationRepository;
