//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules. They
//! consume repository traits and are generic over the storage backend.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Submission, deduplication, lookup, deletion
//! - [`services::publication_service::PublicationService`] - Cross-channel publication status
//! - [`services::favorite_service::FavoriteService`] - Generic favoriting

pub mod services;
