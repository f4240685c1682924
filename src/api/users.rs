use reqwest::Method;

use super::{
    models::{CreateUserInvitation, User, UserInvitation},
    HttpContext,
};
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct UserInvitationClient {
    http: HttpContext,
}

impl UserInvitationClient {
    pub fn new(http: HttpContext) -> Self {
        Self { http }
    }

    pub async fn create(&self, invitation: &CreateUserInvitation) -> Result<UserInvitation, ApiError> {
        let req = self.http.request(Method::POST, "/users/invitations/").json(invitation);
        self.http.send(req).await
    }
}

#[derive(Clone, Debug)]
pub struct UserClient {
    http: HttpContext,
}

impl UserClient {
    pub fn new(http: HttpContext) -> Self {
        Self { http }
    }

    pub async fn all_site_managers(&self) -> Result<Vec<User>, ApiError> {
        let req = self.http.request(Method::GET, "/users/siteManagers/");
        self.http.send(req).await
    }
}
