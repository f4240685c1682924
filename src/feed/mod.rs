//! Session post cache and the paginated feed that fills it.

pub mod scroll;
pub mod store;

pub use scroll::{FeedController, FeedState, FetchOutcome, ScrollMetrics, FIRST_PAGE};
pub use store::PostStore;
