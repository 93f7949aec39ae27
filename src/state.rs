use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{FavoriteService, LinkService, PublicationService};
use crate::infrastructure::persistence::{
    PgFavoriteRepository, PgLinkRepository, PgPublicationRepository,
};

/// Services wired to PostgreSQL repositories over one shared pool.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub publication_service: Arc<PublicationService<PgPublicationRepository>>,
    pub favorite_service: Arc<FavoriteService<PgFavoriteRepository>>,
}

impl AppState {
    pub fn new(pool: Arc<PgPool>) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
        let publication_repository = Arc::new(PgPublicationRepository::new(pool.clone()));
        let favorite_repository = Arc::new(PgFavoriteRepository::new(pool));

        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
            publication_service: Arc::new(PublicationService::new(publication_repository)),
            favorite_service: Arc::new(FavoriteService::new(favorite_repository)),
        }
    }
}
