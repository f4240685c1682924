use reqwest::Method;

use super::{
    models::{SavedSite, SiteDetail, SiteId, SiteName, SiteSocial, SiteType},
    HttpContext,
};
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct SiteClient {
    http: HttpContext,
}

impl SiteClient {
    pub fn new(http: HttpContext) -> Self {
        Self { http }
    }

    /// Absolute URL of an uploaded asset path such as `/media/site.png`.
    pub fn asset_url(&self, asset: &str) -> String {
        format!("{}{}", self.http.base_url(), asset)
    }

    pub async fn detail(&self, id: SiteId) -> Result<SiteDetail, ApiError> {
        let req = self.http.request(Method::GET, &format!("/analytics/sites/{}/", id));
        self.http.send(req).await
    }

    pub async fn all(&self) -> Result<Vec<SiteName>, ApiError> {
        let req = self.http.request(Method::GET, "/analytics/sites/");
        self.http.send(req).await
    }

    pub async fn types(&self) -> Result<Vec<SiteType>, ApiError> {
        let req = self.http.request(Method::GET, "/analytics/siteTypes/");
        self.http.send(req).await
    }

    pub async fn social(&self, id: SiteId) -> Result<SiteSocial, ApiError> {
        let req = self.http.request(Method::GET, &format!("/social/sites/{}/", id));
        self.http.send(req).await
    }

    pub async fn create(&self, site: &SavedSite) -> Result<SiteDetail, ApiError> {
        let req = self.http.request(Method::POST, "/analytics/sites/").json(site);
        self.http.send(req).await
    }

    pub async fn update(&self, id: SiteId, site: &SavedSite) -> Result<SiteDetail, ApiError> {
        let req = self.http.request(Method::PATCH, &format!("/analytics/sites/{}/", id)).json(site);
        self.http.send(req).await
    }
}
