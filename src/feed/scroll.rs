use std::{cell::RefCell, rc::Rc};

use tracing::{debug, warn};

use super::store::PostStore;
use crate::{
    api::{
        models::{Post, SiteId},
        PostApi,
    },
    config::FeedConfig,
};

pub const FIRST_PAGE: u32 = 1;

/// Scroll position of the container holding the feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> f64 {
        (self.scroll_height - self.scroll_top - self.client_height).max(0.0)
    }

    /// Container scrolled all the way down.
    pub fn at_bottom(scroll_height: f64) -> Self {
        Self { scroll_top: scroll_height, client_height: 0.0, scroll_height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Idle,
    LoadingFirstPage,
    LoadingMore,
    /// Last fetch failed. The cursor still points at the failed page.
    Error(String),
    /// A short page was received; there is nothing more to load.
    Exhausted,
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::LoadingFirstPage | FeedState::LoadingMore)
    }
}

/// What a trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not near the bottom, already fetching, exhausted, or no sites.
    Skipped,
    Loaded { count: usize },
    /// The site-id set changed while the request was running.
    Discarded,
    Failed,
}

#[derive(Debug)]
struct Cursor {
    site_ids: Option<Vec<SiteId>>,
    next_page: u32,
    state: FeedState,
    in_flight: bool,
    generation: u64,
}

/// Loads posts of a site-id set page by page as the feed is scrolled.
///
/// Every method takes `&self` so that triggers from several event handlers
/// can interleave on the same thread; the in-flight flag lets only one of
/// them reach the backend at a time. Each fetch is tagged with the
/// generation current when it started, and its result is dropped if
/// [`set_site_ids`](Self::set_site_ids) was called in the meantime.
pub struct FeedController {
    api: Rc<dyn PostApi>,
    store: PostStore,
    page_size: usize,
    scroll_threshold: f64,
    cursor: RefCell<Cursor>,
}

impl FeedController {
    pub fn new(api: Rc<dyn PostApi>, store: PostStore, cfg: &FeedConfig) -> Self {
        Self {
            api,
            store,
            page_size: cfg.page_size.max(1),
            scroll_threshold: cfg.scroll_threshold,
            cursor: RefCell::new(Cursor {
                site_ids: None,
                next_page: FIRST_PAGE,
                state: FeedState::Idle,
                in_flight: false,
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> FeedState {
        self.cursor.borrow().state.clone()
    }

    /// Page the next trigger will request.
    pub fn next_page(&self) -> u32 {
        self.cursor.borrow().next_page
    }

    pub fn site_ids(&self) -> Vec<SiteId> {
        self.cursor.borrow().site_ids.clone().unwrap_or_default()
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Store entries belonging to the active sites, in store order.
    pub fn posts(&self) -> Vec<Post> {
        let site_ids = self.site_ids();
        self.store.snapshot().into_iter().filter(|p| site_ids.contains(&p.site_id)).collect()
    }

    /// Switches to a new site-id set and loads its first page.
    ///
    /// Always resets the cursor and clears `Error`/`Exhausted`. A request
    /// still running for the previous set is left to finish and discarded.
    pub async fn set_site_ids(&self, site_ids: Vec<SiteId>) -> FetchOutcome {
        let generation = {
            let mut cursor = self.cursor.borrow_mut();
            cursor.generation += 1;
            cursor.site_ids = Some(site_ids.clone());
            cursor.next_page = FIRST_PAGE;
            cursor.state = FeedState::LoadingFirstPage;
            cursor.in_flight = true;
            cursor.generation
        };
        debug!(?site_ids, generation, "feed reset");

        self.fetch(site_ids, FIRST_PAGE, generation).await
    }

    /// Requests the next page when the container is close to its end.
    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> FetchOutcome {
        if metrics.distance_to_bottom() >= self.scroll_threshold {
            return FetchOutcome::Skipped;
        }

        self.load_more().await
    }

    /// Requests the cursor page regardless of scroll position. Also retries
    /// the page that failed last.
    pub async fn load_more(&self) -> FetchOutcome {
        let (site_ids, page, generation) = {
            let mut cursor = self.cursor.borrow_mut();
            if cursor.in_flight || cursor.state == FeedState::Exhausted {
                return FetchOutcome::Skipped;
            }
            let site_ids = match &cursor.site_ids {
                Some(ids) => ids.clone(),
                None => return FetchOutcome::Skipped,
            };

            cursor.in_flight = true;
            cursor.state = if cursor.next_page == FIRST_PAGE {
                FeedState::LoadingFirstPage
            } else {
                FeedState::LoadingMore
            };
            (site_ids, cursor.next_page, cursor.generation)
        };

        self.fetch(site_ids, page, generation).await
    }

    async fn fetch(&self, site_ids: Vec<SiteId>, page: u32, generation: u64) -> FetchOutcome {
        let result = self.api.all(&site_ids, page).await;

        let mut cursor = self.cursor.borrow_mut();
        if cursor.generation != generation {
            debug!(?site_ids, page, generation, "dropping stale feed page");
            return FetchOutcome::Discarded;
        }
        cursor.in_flight = false;

        match result {
            Ok(posts) => {
                let count = posts.len();
                if page == FIRST_PAGE {
                    self.store.replace_sites(&site_ids, posts);
                } else {
                    self.store.append_posts(posts);
                }

                cursor.next_page = page + 1;
                cursor.state = if count < self.page_size { FeedState::Exhausted } else { FeedState::Idle };
                debug!(?site_ids, page, count, state = ?cursor.state, "feed page loaded");

                FetchOutcome::Loaded { count }
            }
            Err(e) => {
                warn!(?site_ids, page, error = %e, "failed to load feed page");
                cursor.state = FeedState::Error(e.to_string());

                FetchOutcome::Failed
            }
        }
    }
}
