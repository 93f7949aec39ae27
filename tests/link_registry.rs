mod common;

use link_registry::prelude::*;
use std::sync::Arc;

async fn post_on(services: &common::MemoryServices, link_id: i64, kind: ContentKind) {
    let content = services
        .publication
        .create_content(link_id, kind)
        .await
        .unwrap();
    services.publication.record_post(content.id).await.unwrap();
}

fn ids(links: &[Link]) -> Vec<i64> {
    links.iter().map(|l| l.id).collect()
}

#[tokio::test]
async fn test_second_submit_reports_first_link() {
    let services = common::memory_services();

    let first = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();

    let err = services
        .links
        .submit(LinkSubmission::new("http://example.com").with_title("Again"))
        .await
        .unwrap_err();

    match err {
        AppError::Validation(ValidationError::DuplicateUrl { existing_link }) => {
            assert_eq!(existing_link.id, first.id);
        }
        other => panic!("expected duplicate url, got {other:?}"),
    }

    assert_eq!(services.links.list_links(1, 100).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_past_the_last_page_is_empty() {
    let services = common::memory_services();

    services
        .links
        .submit(LinkSubmission::new("https://example.com"))
        .await
        .unwrap();

    assert!(services.links.list_links(2, 50).await.unwrap().is_empty());
    assert!(services.links.list_links(i64::MAX, 50).await.unwrap().is_empty());
    assert!(services.links.list_links(i64::MAX, i64::MAX).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submits_have_one_winner() {
    let services = Arc::new(common::memory_services());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let services = services.clone();
            tokio::spawn(async move {
                services
                    .links
                    .submit(LinkSubmission::new("https://race.example.com"))
                    .await
            })
        })
        .collect();

    let mut winners = Vec::new();
    let mut duplicates = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(link) => winners.push(link.id),
            Err(err) => duplicates.push(err.existing_link().map(|l| l.id)),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(duplicates.len(), 15);
    assert!(duplicates.iter().all(|id| *id == Some(winners[0])));
}

#[tokio::test]
async fn test_find_conflicting_and_is_duplicate() {
    let services = common::memory_services();

    assert!(services
        .links
        .find_conflicting("http://example.com")
        .await
        .unwrap()
        .is_none());

    let link = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();

    let conflicting = services
        .links
        .find_conflicting("http://example.com")
        .await
        .unwrap();
    assert_eq!(conflicting.map(|l| l.id), Some(link.id));
    assert!(services.links.is_duplicate("http://example.com").await.unwrap());
    assert!(!services.links.is_duplicate("http://other.com").await.unwrap());
}

#[tokio::test]
async fn test_unposted_empty_store() {
    let services = common::memory_services();
    assert!(services.publication.unposted().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unposted_includes_link_without_content() {
    let services = common::memory_services();

    let link = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();

    assert_eq!(ids(&services.publication.unposted().await.unwrap()), vec![link.id]);
    assert!(services.publication.is_unposted(link.id).await.unwrap());
}

#[tokio::test]
async fn test_content_without_post_stays_unposted() {
    let services = common::memory_services();

    let link = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();
    services
        .publication
        .create_content(link.id, ContentKind::Twitter)
        .await
        .unwrap();

    assert_eq!(ids(&services.publication.unposted().await.unwrap()), vec![link.id]);
    assert!(!services
        .publication
        .has_post(link.id, ContentKind::Twitter)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_post_on_either_channel_excludes_link() {
    for kind in ContentKind::ALL {
        let services = common::memory_services();

        let link = services
            .links
            .submit(LinkSubmission::new("http://example.com"))
            .await
            .unwrap();
        post_on(&services, link.id, kind).await;

        assert!(services.publication.unposted().await.unwrap().is_empty());
        assert!(!services.publication.is_unposted(link.id).await.unwrap());
        assert!(services.publication.has_post(link.id, kind).await.unwrap());
    }
}

#[tokio::test]
async fn test_post_on_both_channels_excludes_link() {
    let services = common::memory_services();

    let link = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();
    post_on(&services, link.id, ContentKind::Twitter).await;
    post_on(&services, link.id, ContentKind::Facebook).await;

    assert!(services.publication.unposted().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unposted_is_ordered_and_repeatable() {
    let services = common::memory_services();

    let mut expected = Vec::new();
    for i in 0..4 {
        let link = services
            .links
            .submit(LinkSubmission::new(format!("https://example.com/{i}")))
            .await
            .unwrap();
        if i == 2 {
            post_on(&services, link.id, ContentKind::Facebook).await;
        } else {
            expected.push(link.id);
        }
    }

    let first = services.publication.unposted().await.unwrap();
    let second = services.publication.unposted().await.unwrap();

    assert_eq!(ids(&first), expected);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unposted_on_single_channel() {
    let services = common::memory_services();

    let link = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();
    post_on(&services, link.id, ContentKind::Twitter).await;

    assert!(services
        .publication
        .unposted_on(ContentKind::Twitter)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        ids(&services
            .publication
            .unposted_on(ContentKind::Facebook)
            .await
            .unwrap()),
        vec![link.id]
    );
}

#[tokio::test]
async fn test_display_name() {
    let services = common::memory_services();

    let titled = services
        .links
        .submit(LinkSubmission::new("http://example.com/a").with_title("This is the title"))
        .await
        .unwrap();
    let empty_title = services
        .links
        .submit(LinkSubmission::new("http://example.com").with_title(""))
        .await
        .unwrap();
    let untitled = services
        .links
        .submit(LinkSubmission::new("http://example.com/b"))
        .await
        .unwrap();

    assert_eq!(
        services.links.display_name(titled.id).await.unwrap(),
        "This is the title"
    );
    assert_eq!(
        services.links.display_name(empty_title.id).await.unwrap(),
        "http://example.com"
    );
    assert_eq!(
        services.links.display_name(untitled.id).await.unwrap(),
        "http://example.com/b"
    );
}

#[tokio::test]
async fn test_favorites_are_per_user() {
    let services = common::memory_services();

    let link = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();

    assert!(!services.favorites.is_favorited_by(&link, 1).await.unwrap());

    services.favorites.favorite(&link, 1).await.unwrap();
    services.favorites.favorite(&link, 1).await.unwrap();

    assert!(services.favorites.is_favorited_by(&link, 1).await.unwrap());
    assert!(!services.favorites.is_favorited_by(&link, 2).await.unwrap());
    assert_eq!(services.favorites.favorite_count(&link).await.unwrap(), 1);

    assert!(services.favorites.unfavorite(&link, 1).await.unwrap());
    assert!(!services.favorites.unfavorite(&link, 1).await.unwrap());
    assert!(!services.favorites.is_favorited_by(&link, 1).await.unwrap());
}

#[tokio::test]
async fn test_delete_frees_url_and_cascades() {
    let services = common::memory_services();

    let link = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();
    post_on(&services, link.id, ContentKind::Twitter).await;
    services.favorites.favorite(&link, 1).await.unwrap();

    services.links.delete_link(link.id).await.unwrap();

    assert!(matches!(
        services.publication.is_unposted(link.id).await.unwrap_err(),
        AppError::NotFound { .. }
    ));
    assert!(!services.favorites.is_favorited_by(&link, 1).await.unwrap());

    let resubmitted = services
        .links
        .submit(LinkSubmission::new("http://example.com"))
        .await
        .unwrap();
    assert_ne!(resubmitted.id, link.id);
    assert!(services.publication.is_unposted(resubmitted.id).await.unwrap());
}

#[tokio::test]
async fn test_publication_rejects_unknown_references() {
    let services = common::memory_services();

    assert!(matches!(
        services
            .publication
            .create_content(404, ContentKind::Twitter)
            .await
            .unwrap_err(),
        AppError::NotFound { .. }
    ));
    assert!(matches!(
        services.publication.record_post(404).await.unwrap_err(),
        AppError::NotFound { .. }
    ));
}
