use async_trait::async_trait;
use reqwest::Method;

use super::{
    models::{CreatePost, Post, PostId, SiteId},
    HttpContext, PostApi,
};
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct PostClient {
    http: HttpContext,
}

impl PostClient {
    pub fn new(http: HttpContext) -> Self {
        Self { http }
    }
}

#[async_trait(?Send)]
impl PostApi for PostClient {
    async fn all(&self, site_ids: &[SiteId], page: u32) -> Result<Vec<Post>, ApiError> {
        let mut query: Vec<(&str, String)> = site_ids.iter().map(|id| ("siteIds", id.to_string())).collect();
        query.push(("page", page.to_string()));

        let req = self.http.request(Method::GET, "/social/posts/").query(&query);
        self.http.send(req).await
    }

    async fn create(&self, post: &CreatePost) -> Result<Post, ApiError> {
        let req = self.http.request(Method::POST, "/social/posts/").json(post);
        self.http.send(req).await
    }

    async fn like(&self, post_id: PostId) -> Result<(), ApiError> {
        let req = self.http.request(Method::POST, &format!("/social/posts/{}/likes/", post_id));
        self.http.send_empty(req).await
    }

    async fn unlike(&self, post_id: PostId) -> Result<(), ApiError> {
        let req = self.http.request(Method::DELETE, &format!("/social/posts/{}/likes/", post_id));
        self.http.send_empty(req).await
    }
}
