//! Business logic services for the application layer.

pub mod favorite_service;
pub mod link_service;
pub mod publication_service;

pub use favorite_service::FavoriteService;
pub use link_service::LinkService;
pub use publication_service::PublicationService;
