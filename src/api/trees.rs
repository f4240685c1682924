use reqwest::Method;

use super::{models::TreeType, HttpContext};
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct TreeClient {
    http: HttpContext,
}

impl TreeClient {
    pub fn new(http: HttpContext) -> Self {
        Self { http }
    }

    pub async fn species(&self) -> Result<Vec<TreeType>, ApiError> {
        let req = self.http.request(Method::GET, "/trees/species/");
        self.http.send(req).await
    }
}
