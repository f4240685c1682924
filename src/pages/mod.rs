//! Page-level state containers.
//!
//! A page is driven by method calls standing in for user gestures and read
//! through accessors standing in for what the page renders.

pub mod analytics;
pub mod social;

pub use analytics::{AnalyticsPage, HomePage};
pub use social::SiteSocialPage;

use crate::api::models::{Role, SiteId, User};

/// Which actions a page exposes to the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Visitor,
    User,
    Admin,
}

impl ViewMode {
    pub fn for_site(user: Option<&User>, site_id: SiteId) -> Self {
        match user {
            None => ViewMode::Visitor,
            Some(u) if u.role == Role::MegaAdmin || u.admin_site_ids.contains(&site_id) => ViewMode::Admin,
            Some(_) => ViewMode::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
