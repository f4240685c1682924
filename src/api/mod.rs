//! Typed client for the Canopeum REST backend.
//!
//! Calls are grouped per resource the same way the backend groups its
//! routes. All sub-clients share one [`HttpContext`], so cloning them is
//! cheap.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{config::ApiConfig, error::ApiError};

pub mod analytics;
pub mod models;
pub mod posts;
pub mod sites;
pub mod trees;
pub mod users;

pub use analytics::{BatchClient, SummaryClient};
pub use posts::PostClient;
pub use sites::SiteClient;
pub use trees::TreeClient;
pub use users::{UserClient, UserInvitationClient};

use models::{CreatePost, Post, PostId, SiteId};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Post operations the feed and the social page depend on.
///
/// Kept as a trait so feed pagination can run against something other
/// than the live backend.
#[async_trait(?Send)]
pub trait PostApi {
    /// One page (1-based) of posts of the given sites, newest first.
    async fn all(&self, site_ids: &[SiteId], page: u32) -> Result<Vec<Post>, ApiError>;

    async fn create(&self, post: &CreatePost) -> Result<Post, ApiError>;

    async fn like(&self, post_id: PostId) -> Result<(), ApiError>;

    async fn unlike(&self, post_id: PostId) -> Result<(), ApiError>;
}

/// Connection shared by every sub-client.
#[derive(Clone, Debug)]
pub struct HttpContext {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpContext {
    pub fn new(cfg: &ApiConfig) -> Result<Self, ApiError> {
        let timeout = cfg.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");

        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Sends the request and decodes a JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let text = self.send_raw(req).await?;

        Ok(serde_json::from_str(&text)?)
    }

    /// Sends the request and ignores the body of a successful response.
    pub(crate) async fn send_empty(&self, req: RequestBuilder) -> Result<(), ApiError> {
        self.send_raw(req).await.map(|_| ())
    }

    async fn send_raw(&self, req: RequestBuilder) -> Result<String, ApiError> {
        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), response = %text, "api error response");
            return Err(ApiError::Status { status: status.as_u16(), response: text });
        }

        Ok(text)
    }
}

/// Entry point bundling every resource client.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub site_client: SiteClient,
    pub post_client: PostClient,
    pub tree_client: TreeClient,
    pub user_invitation_client: UserInvitationClient,
    pub user_client: UserClient,
    pub summary_client: SummaryClient,
    pub batch_client: BatchClient,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::with_context(HttpContext::new(cfg)?))
    }

    pub fn with_context(http: HttpContext) -> Self {
        Self {
            site_client: SiteClient::new(http.clone()),
            post_client: PostClient::new(http.clone()),
            tree_client: TreeClient::new(http.clone()),
            user_invitation_client: UserInvitationClient::new(http.clone()),
            user_client: UserClient::new(http.clone()),
            summary_client: SummaryClient::new(http.clone()),
            batch_client: BatchClient::new(http),
        }
    }
}
