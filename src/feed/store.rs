use std::{cell::RefCell, rc::Rc};

use crate::api::models::{Post, PostId, SiteId};

/// Session cache of posts, newest first, unique by post id.
///
/// Cloning gives another handle to the same collection, so every view that
/// receives a clone reads and writes the same posts. The handle is `!Send`:
/// the store lives on the single thread that drives the views.
#[derive(Clone, Debug, Default)]
pub struct PostStore {
    posts: Rc<RefCell<Vec<Post>>>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection. Later duplicates of an id are dropped.
    pub fn set_posts(&self, posts: Vec<Post>) {
        let mut deduped: Vec<Post> = Vec::with_capacity(posts.len());
        for post in posts {
            upsert_back(&mut deduped, post);
        }

        *self.posts.borrow_mut() = deduped;
    }

    /// Replaces the posts of `site_ids` with `page`, placed at the front.
    /// Posts of other sites stay where they are.
    pub fn replace_sites(&self, site_ids: &[SiteId], page: Vec<Post>) {
        let mut fresh: Vec<Post> = Vec::with_capacity(page.len());
        for post in page {
            upsert_back(&mut fresh, post);
        }

        let mut posts = self.posts.borrow_mut();
        posts.retain(|p| !site_ids.contains(&p.site_id) && !fresh.iter().any(|f| f.id == p.id));
        fresh.extend(posts.drain(..));
        *posts = fresh;
    }

    /// Inserts a post at the front. A post with the same id is replaced in
    /// place and keeps its position.
    pub fn add_post(&self, post: Post) {
        let mut posts = self.posts.borrow_mut();
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post,
            None => posts.insert(0, post),
        }
    }

    /// Appends an older page after the current entries, replacing posts
    /// already present by id.
    pub fn append_posts(&self, page: Vec<Post>) {
        let mut posts = self.posts.borrow_mut();
        for post in page {
            upsert_back(&mut posts, post);
        }
    }

    /// Posts of one site, in store order.
    pub fn posts_for_site(&self, site_id: SiteId) -> Vec<Post> {
        self.posts.borrow().iter().filter(|p| p.site_id == site_id).cloned().collect()
    }

    pub fn get(&self, post_id: PostId) -> Option<Post> {
        self.posts.borrow().iter().find(|p| p.id == post_id).cloned()
    }

    /// Toggles the like of a post in place. Returns the updated post.
    pub fn toggle_like(&self, post_id: PostId) -> Option<Post> {
        let mut posts = self.posts.borrow_mut();
        let post = posts.iter_mut().find(|p| p.id == post_id)?;
        post.toggle_like();

        Some(post.clone())
    }

    /// Puts back a known like flag and count. Returns the updated post.
    pub fn set_like(&self, post_id: PostId, has_liked: bool, like_count: i64) -> Option<Post> {
        let mut posts = self.posts.borrow_mut();
        let post = posts.iter_mut().find(|p| p.id == post_id)?;
        post.has_liked = has_liked;
        post.like_count = like_count;

        Some(post.clone())
    }

    pub fn snapshot(&self) -> Vec<Post> {
        self.posts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.posts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.borrow().is_empty()
    }
}

fn upsert_back(posts: &mut Vec<Post>, post: Post) {
    match posts.iter_mut().find(|p| p.id == post.id) {
        Some(existing) => *existing = post,
        None => posts.push(post),
    }
}
