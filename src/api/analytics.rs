use reqwest::Method;

use super::{
    models::{BatchAnalytics, SiteSummary},
    HttpContext,
};
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct SummaryClient {
    http: HttpContext,
}

impl SummaryClient {
    pub fn new(http: HttpContext) -> Self {
        Self { http }
    }

    pub async fn all(&self) -> Result<Vec<SiteSummary>, ApiError> {
        let req = self.http.request(Method::GET, "/analytics/summary/");
        self.http.send(req).await
    }
}

#[derive(Clone, Debug)]
pub struct BatchClient {
    http: HttpContext,
}

impl BatchClient {
    pub fn new(http: HttpContext) -> Self {
        Self { http }
    }

    pub async fn all(&self) -> Result<Vec<BatchAnalytics>, ApiError> {
        let req = self.http.request(Method::GET, "/analytics/batches/");
        self.http.send(req).await
    }
}
