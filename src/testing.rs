//! In-memory doubles shared by unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::channel::oneshot;

use crate::{
    api::{
        models::{CreatePost, Post, PostAuthor, PostId, SiteId},
        PostApi,
    },
    error::ApiError,
};

pub fn post(id: PostId, site_id: SiteId) -> Post {
    let at = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap() - chrono::Duration::minutes(id as i64);
    Post {
        id,
        site_id,
        author: PostAuthor { id: 1, username: "ada".into() },
        body: format!("post {}", id),
        like_count: 0,
        has_liked: false,
        created_at: at,
        updated_at: at,
    }
}

type PageKey = (Vec<SiteId>, u32);

/// Paginates a fixed set of posts the way the backend does.
pub struct ScriptedPosts {
    posts: RefCell<Vec<Post>>,
    page_size: usize,
    failures: Cell<u32>,
    gates: RefCell<HashMap<PageKey, oneshot::Receiver<()>>>,
    like_gates: RefCell<HashMap<(PostId, bool), oneshot::Receiver<()>>>,
    pub calls: RefCell<Vec<PageKey>>,
    pub likes: RefCell<Vec<(PostId, bool)>>,
    pub fail_likes: Cell<bool>,
}

impl ScriptedPosts {
    pub fn new(posts: Vec<Post>, page_size: usize) -> Self {
        Self {
            posts: RefCell::new(posts),
            page_size,
            failures: Cell::new(0),
            gates: RefCell::new(HashMap::new()),
            like_gates: RefCell::new(HashMap::new()),
            calls: RefCell::new(vec![]),
            likes: RefCell::new(vec![]),
            fail_likes: Cell::new(false),
        }
    }

    /// The next `n` page requests fail.
    pub fn fail_next(&self, n: u32) {
        self.failures.set(n);
    }

    /// Holds the response for `(site_ids, page)` until the sender fires.
    pub fn gate(&self, site_ids: &[SiteId], page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert((site_ids.to_vec(), page), rx);
        tx
    }

    /// Holds the answer to a like (`true`) or unlike (`false`) of `post_id`
    /// until the sender fires. `fail_likes` is read after the release.
    pub fn gate_like(&self, post_id: PostId, liked: bool) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.like_gates.borrow_mut().insert((post_id, liked), rx);
        tx
    }

    pub fn calls_for_page(&self, page: u32) -> usize {
        self.calls.borrow().iter().filter(|(_, p)| *p == page).count()
    }
}

#[async_trait(?Send)]
impl PostApi for ScriptedPosts {
    async fn all(&self, site_ids: &[SiteId], page: u32) -> Result<Vec<Post>, ApiError> {
        let key = (site_ids.to_vec(), page);
        self.calls.borrow_mut().push(key.clone());

        let gate = self.gates.borrow_mut().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(ApiError::Status { status: 503, response: "unavailable".into() });
        }

        let skip = (page.saturating_sub(1) as usize) * self.page_size;
        Ok(self
            .posts
            .borrow()
            .iter()
            .filter(|p| site_ids.contains(&p.site_id))
            .skip(skip)
            .take(self.page_size)
            .cloned()
            .collect())
    }

    async fn create(&self, new: &CreatePost) -> Result<Post, ApiError> {
        let id = self.posts.borrow().iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let mut created = post(id, new.site_id);
        created.body = new.body.clone();
        self.posts.borrow_mut().insert(0, created.clone());

        Ok(created)
    }

    async fn like(&self, post_id: PostId) -> Result<(), ApiError> {
        self.record_like(post_id, true).await
    }

    async fn unlike(&self, post_id: PostId) -> Result<(), ApiError> {
        self.record_like(post_id, false).await
    }
}

impl ScriptedPosts {
    async fn record_like(&self, post_id: PostId, liked: bool) -> Result<(), ApiError> {
        let gate = self.like_gates.borrow_mut().remove(&(post_id, liked));
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.fail_likes.get() {
            return Err(ApiError::Status { status: 500, response: "boom".into() });
        }
        self.likes.borrow_mut().push((post_id, liked));

        Ok(())
    }
}
