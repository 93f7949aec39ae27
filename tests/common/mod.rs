#![allow(dead_code)]

use link_registry::application::services::{FavoriteService, LinkService, PublicationService};
use link_registry::infrastructure::persistence::InMemoryStore;
use sqlx::PgPool;
use std::sync::Arc;

/// Services sharing one in-memory store.
pub struct MemoryServices {
    pub links: LinkService<InMemoryStore>,
    pub publication: PublicationService<InMemoryStore>,
    pub favorites: FavoriteService<InMemoryStore>,
}

pub fn memory_services() -> MemoryServices {
    let store = Arc::new(InMemoryStore::new());

    MemoryServices {
        links: LinkService::new(store.clone()),
        publication: PublicationService::new(store.clone()),
        favorites: FavoriteService::new(store),
    }
}

pub async fn create_test_link(pool: &PgPool, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (url) VALUES ($1) RETURNING id")
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_content(pool: &PgPool, link_id: i64, kind: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO contents (link_id, kind) VALUES ($1, $2) RETURNING id")
        .bind(link_id)
        .bind(kind)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_post(pool: &PgPool, content_id: i64) -> i64 {
    sqlx::query_scalar("INSERT INTO posts (content_id) VALUES ($1) RETURNING id")
        .bind(content_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
