use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 100.0;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Public URL of the web app, used to build invitation links.
    pub app_base_url: String,

    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token of the signed-in user. Visitors have none.
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedConfig {
    /// Number of posts the backend returns per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Distance to the bottom of the container, in pixels, under which
    /// the next page is requested.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE, scroll_threshold: DEFAULT_SCROLL_THRESHOLD }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_scroll_threshold() -> f64 {
    DEFAULT_SCROLL_THRESHOLD
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let cfg = String::from_utf8_lossy(&bytes);
        Ok(toml::from_str(&cfg)?)
    }
}
