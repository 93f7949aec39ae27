//! PostgreSQL publication repository tests.
//!
//! Requires `DATABASE_URL`; `sqlx::test` creates a fresh database per test.

mod common;

use link_registry::domain::entities::{ContentKind, NewContent, NewPost};
use link_registry::domain::repositories::PublicationRepository;
use link_registry::error::AppError;
use link_registry::infrastructure::persistence::PgPublicationRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn ids(links: &[link_registry::domain::entities::Link]) -> Vec<i64> {
    links.iter().map(|l| l.id).collect()
}

#[sqlx::test]
async fn test_unposted_without_links(pool: PgPool) {
    let repo = PgPublicationRepository::new(Arc::new(pool));

    assert!(repo.unposted(&ContentKind::ALL).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_unposted_includes_links_with_no_posts(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "https://example.com").await;
    common::create_test_content(&pool, link_id, "twitter").await;

    let repo = PgPublicationRepository::new(Arc::new(pool));

    assert_eq!(ids(&repo.unposted(&ContentKind::ALL).await.unwrap()), vec![link_id]);
    assert_eq!(
        repo.is_unposted(link_id, &ContentKind::ALL).await.unwrap(),
        Some(true)
    );
}

#[sqlx::test]
async fn test_post_on_any_channel_excludes_link(pool: PgPool) {
    let twitter_link = common::create_test_link(&pool, "https://twitter.example.com").await;
    let content = common::create_test_content(&pool, twitter_link, "twitter").await;
    common::create_test_post(&pool, content).await;

    let facebook_link = common::create_test_link(&pool, "https://facebook.example.com").await;
    let content = common::create_test_content(&pool, facebook_link, "facebook").await;
    common::create_test_post(&pool, content).await;

    let both_link = common::create_test_link(&pool, "https://both.example.com").await;
    for kind in ["twitter", "facebook"] {
        let content = common::create_test_content(&pool, both_link, kind).await;
        common::create_test_post(&pool, content).await;
    }

    let unposted_link = common::create_test_link(&pool, "https://none.example.com").await;

    let repo = PgPublicationRepository::new(Arc::new(pool));

    assert_eq!(
        ids(&repo.unposted(&ContentKind::ALL).await.unwrap()),
        vec![unposted_link]
    );
    assert_eq!(
        repo.is_unposted(twitter_link, &ContentKind::ALL).await.unwrap(),
        Some(false)
    );
    assert_eq!(
        ids(&repo.unposted(&[ContentKind::Facebook]).await.unwrap()),
        vec![twitter_link, unposted_link]
    );
}

#[sqlx::test]
async fn test_is_unposted_missing_link(pool: PgPool) {
    let repo = PgPublicationRepository::new(Arc::new(pool));

    assert_eq!(repo.is_unposted(999, &ContentKind::ALL).await.unwrap(), None);
}

#[sqlx::test]
async fn test_create_content_and_record_post(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "https://example.com").await;
    let repo = PgPublicationRepository::new(Arc::new(pool));

    let content = repo
        .create_content(NewContent {
            link_id,
            kind: ContentKind::Facebook,
        })
        .await
        .unwrap();
    assert_eq!(content.kind, ContentKind::Facebook);

    let post = repo
        .record_post(NewPost {
            content_id: content.id,
        })
        .await
        .unwrap();
    assert_eq!(post.content_id, content.id);

    assert_eq!(
        repo.is_unposted(link_id, &[ContentKind::Facebook]).await.unwrap(),
        Some(false)
    );
}

#[sqlx::test]
async fn test_unknown_references_are_not_found(pool: PgPool) {
    let repo = PgPublicationRepository::new(Arc::new(pool));

    let err = repo
        .create_content(NewContent {
            link_id: 404,
            kind: ContentKind::Twitter,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = repo
        .record_post(NewPost { content_id: 404 })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
