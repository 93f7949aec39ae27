//! In-process implementation of every repository trait.
//!
//! All state sits behind one mutex, so each operation is a single atomic
//! step: the URL check-and-insert in [`LinkRepository::create`] cannot
//! interleave with another insert, and status queries read one snapshot.
//! Useful for tests and for embedding the registry without PostgreSQL.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{
    Content, ContentKind, Favoritable, ItemRef, Link, NewContent, NewLink, NewPost, Post,
};
use crate::domain::repositories::{
    FavoriteRepository, LINKS_URL_CONSTRAINT, LinkRepository, PublicationRepository,
};
use crate::error::AppError;

#[derive(Debug, Default)]
struct State {
    links: BTreeMap<i64, Link>,
    contents: BTreeMap<i64, Content>,
    posts: BTreeMap<i64, Post>,
    favorites: BTreeSet<(ItemRef, i64)>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Ids of links with at least one post through content of any of `kinds`.
    fn posted_links(&self, kinds: &[ContentKind]) -> BTreeSet<i64> {
        let posted_contents: BTreeSet<i64> =
            self.posts.values().map(|post| post.content_id).collect();

        self.contents
            .values()
            .filter(|content| kinds.contains(&content.kind))
            .filter(|content| posted_contents.contains(&content.id))
            .map(|content| content.link_id)
            .collect()
    }
}

/// Repository backed by in-process maps.
///
/// Ids are allocated from one counter shared by all tables, starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, AppError> {
        self.state
            .lock()
            .map_err(|e| {
                AppError::internal("Store lock poisoned", json!({ "reason": e.to_string() }))
            })
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut state = self.state()?;

        if state.links.values().any(|l| l.url == new_link.url) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                Some(LINKS_URL_CONSTRAINT),
            ));
        }

        let now = Utc::now();
        let id = state.next_id();
        let link = Link::new(
            id,
            new_link.url,
            new_link.title,
            new_link.summary,
            new_link.submitted_by,
            now,
            now,
        );
        state.links.insert(id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.state()?.links.get(&id).cloned())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .state()?
            .links
            .values()
            .find(|l| l.url == url)
            .cloned())
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<Link>, AppError> {
        let offset = page.saturating_sub(1).max(0).saturating_mul(page_size);
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(page_size).unwrap_or(0);

        Ok(self
            .state()?
            .links
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut state = self.state()?;

        if state.links.remove(&id).is_none() {
            return Ok(false);
        }

        let content_ids: BTreeSet<i64> = state
            .contents
            .values()
            .filter(|c| c.link_id == id)
            .map(|c| c.id)
            .collect();
        state.contents.retain(|_, c| c.link_id != id);
        state.posts.retain(|_, p| !content_ids.contains(&p.content_id));

        let item = ItemRef::new(Link::ITEM_TYPE, id);
        state.favorites.retain(|(favorited, _)| *favorited != item);

        Ok(true)
    }
}

#[async_trait]
impl PublicationRepository for InMemoryStore {
    async fn create_content(&self, new_content: NewContent) -> Result<Content, AppError> {
        let mut state = self.state()?;

        if !state.links.contains_key(&new_content.link_id) {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "id": new_content.link_id }),
            ));
        }

        let id = state.next_id();
        let content = Content {
            id,
            link_id: new_content.link_id,
            kind: new_content.kind,
            created_at: Utc::now(),
        };
        state.contents.insert(id, content.clone());

        Ok(content)
    }

    async fn record_post(&self, new_post: NewPost) -> Result<Post, AppError> {
        let mut state = self.state()?;

        if !state.contents.contains_key(&new_post.content_id) {
            return Err(AppError::not_found(
                "Content not found",
                json!({ "id": new_post.content_id }),
            ));
        }

        let id = state.next_id();
        let post = Post {
            id,
            content_id: new_post.content_id,
            created_at: Utc::now(),
        };
        state.posts.insert(id, post.clone());

        Ok(post)
    }

    async fn is_unposted(
        &self,
        link_id: i64,
        kinds: &[ContentKind],
    ) -> Result<Option<bool>, AppError> {
        let state = self.state()?;

        if !state.links.contains_key(&link_id) {
            return Ok(None);
        }

        Ok(Some(!state.posted_links(kinds).contains(&link_id)))
    }

    async fn unposted(&self, kinds: &[ContentKind]) -> Result<Vec<Link>, AppError> {
        let state = self.state()?;
        let posted = state.posted_links(kinds);

        Ok(state
            .links
            .values()
            .filter(|l| !posted.contains(&l.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn add(&self, item: ItemRef, user_id: i64) -> Result<(), AppError> {
        self.state()?.favorites.insert((item, user_id));
        Ok(())
    }

    async fn remove(&self, item: ItemRef, user_id: i64) -> Result<bool, AppError> {
        Ok(self.state()?.favorites.remove(&(item, user_id)))
    }

    async fn exists(&self, item: ItemRef, user_id: i64) -> Result<bool, AppError> {
        Ok(self.state()?.favorites.contains(&(item, user_id)))
    }

    async fn count(&self, item: ItemRef) -> Result<i64, AppError> {
        let count = self
            .state()?
            .favorites
            .iter()
            .filter(|(favorited, _)| *favorited == item)
            .count();
        Ok(count as i64)
    }
}
