use std::{cell::RefCell, rc::Rc};

use tracing::{info, warn};

use super::{LoadState, ViewMode};
use crate::{
    api::{
        models::{Announcement, Contact, CreatePost, Post, PostId, SiteId, SiteSocial, User},
        ApiClient, PostApi, SiteClient,
    },
    config::FeedConfig,
    error::PageError,
    feed::{FeedController, FeedState, FetchOutcome, PostStore, ScrollMetrics},
};

/// Route parameter to site id. Anything unparsable maps to `0`.
pub fn site_id_from_route(param: Option<&str>) -> SiteId {
    param.and_then(|p| p.parse().ok()).unwrap_or(0)
}

/// Social page of one site: header, announcement, contact and the feed.
pub struct SiteSocialPage {
    site_client: SiteClient,
    posts: Rc<dyn PostApi>,
    site_id: SiteId,
    view_mode: ViewMode,
    site: RefCell<LoadState<SiteSocial>>,
    feed: FeedController,
}

impl SiteSocialPage {
    pub fn new(api: &ApiClient, store: PostStore, cfg: &FeedConfig, site_id: SiteId, current_user: Option<&User>) -> Self {
        Self::with_post_api(api.site_client.clone(), Rc::new(api.post_client.clone()), store, cfg, site_id, current_user)
    }

    pub fn with_post_api(
        site_client: SiteClient,
        posts: Rc<dyn PostApi>,
        store: PostStore,
        cfg: &FeedConfig,
        site_id: SiteId,
        current_user: Option<&User>,
    ) -> Self {
        Self {
            feed: FeedController::new(posts.clone(), store, cfg),
            site_client,
            posts,
            site_id,
            view_mode: ViewMode::for_site(current_user, site_id),
            site: RefCell::new(LoadState::Loading),
        }
    }

    pub fn site_id(&self) -> SiteId {
        self.site_id
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Only admins of the site get the post composer.
    pub fn can_create_posts(&self) -> bool {
        self.view_mode == ViewMode::Admin
    }

    pub fn site(&self) -> LoadState<SiteSocial> {
        self.site.borrow().clone()
    }

    pub fn announcement(&self) -> Option<Announcement> {
        self.site.borrow().loaded().and_then(|s| s.announcement.clone())
    }

    pub fn contact(&self) -> Option<Contact> {
        self.site.borrow().loaded().and_then(|s| s.contact.clone())
    }

    pub fn feed_state(&self) -> FeedState {
        self.feed.state()
    }

    /// Posts of this site, newest first.
    pub fn site_posts(&self) -> Vec<Post> {
        self.feed.store().posts_for_site(self.site_id)
    }

    /// Fetches the site header and the first feed page side by side.
    pub async fn load(&self) -> FetchOutcome {
        *self.site.borrow_mut() = LoadState::Loading;

        let (site, outcome) = futures::join!(self.site_client.social(self.site_id), self.feed.set_site_ids(vec![self.site_id]));

        *self.site.borrow_mut() = match site {
            Ok(site) => LoadState::Loaded(site),
            Err(e) => {
                warn!(site_id = self.site_id, error = %e, "failed to load site");
                LoadState::Error(e.to_string())
            }
        };

        outcome
    }

    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> FetchOutcome {
        self.feed.on_scroll(metrics).await
    }

    pub async fn create_post(&self, body: impl Into<String>) -> Result<Post, PageError> {
        if !self.can_create_posts() {
            return Err(PageError::Forbidden(self.site_id));
        }

        let post = self.posts.create(&CreatePost { site_id: self.site_id, body: body.into() }).await?;
        info!(site_id = self.site_id, post_id = post.id, "post created");
        self.feed.store().add_post(post.clone());

        Ok(post)
    }

    /// Toggles the like locally, then tells the backend. If the backend
    /// refuses, the flag and count seen before the toggle are put back.
    pub async fn like_post(&self, post_id: PostId) -> Result<Post, PageError> {
        let store = self.feed.store();
        let previous = store.get(post_id).ok_or(PageError::UnknownPost(post_id))?;
        let post = store.toggle_like(post_id).ok_or(PageError::UnknownPost(post_id))?;

        let result = if post.has_liked { self.posts.like(post_id).await } else { self.posts.unlike(post_id).await };

        if let Err(e) = result {
            warn!(post_id, error = %e, "like failed, reverting");
            store.set_like(post_id, previous.has_liked, previous.like_count);
            return Err(e.into());
        }

        Ok(post)
    }
}
