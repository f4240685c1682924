use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::{
        models::{CreateUserInvitation, SiteId},
        ApiClient, SiteClient, UserInvitationClient,
    },
    error::ApiError,
    locale,
    validators::{self, InputValidationError},
};

/// Error code the backend sends when the invited email already has an
/// account.
pub const EMAIL_TAKEN: &str = "email_taken";

#[derive(Error, Debug)]
pub enum InvitationError {
    #[error("invalid email: {0}")]
    Validation(InputValidationError),

    #[error("email already taken")]
    EmailTaken,

    #[error("failed to generate invitation: {0}")]
    Failed(ApiError),
}

impl InvitationError {
    /// Text shown to the user under the form.
    pub fn message(&self) -> &'static str {
        match self {
            InvitationError::Validation(e) => locale::translate(e.email_message_key()),
            InvitationError::EmailTaken => locale::translate("settings.manage-admins.email-taken"),
            InvitationError::Failed(_) => locale::translate("settings.manage-admins.generate-link-error"),
        }
    }
}

impl From<ApiError> for InvitationError {
    fn from(err: ApiError) -> Self {
        if err.code().as_deref() == Some(EMAIL_TAKEN) {
            InvitationError::EmailTaken
        } else {
            InvitationError::Failed(err)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionItem<T> {
    pub display_text: String,
    pub value: T,
}

/// Form generating a registration link for a future site admin.
pub struct AdminInvitationDialog {
    sites: SiteClient,
    invitations: UserInvitationClient,
    app_base_url: String,

    site_options: Vec<SelectionItem<SiteId>>,
    email: String,
    site_ids: Vec<SiteId>,
    email_error: Option<InputValidationError>,
    generate_link_error: Option<&'static str>,
    invitation_link: Option<String>,
}

impl AdminInvitationDialog {
    pub fn new(api: &ApiClient, app_base_url: &str) -> Self {
        Self {
            sites: api.site_client.clone(),
            invitations: api.user_invitation_client.clone(),
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
            site_options: vec![],
            email: String::new(),
            site_ids: vec![],
            email_error: None,
            generate_link_error: None,
            invitation_link: None,
        }
    }

    /// Loads the sites the invitee can be assigned to.
    pub async fn open(&mut self) -> Result<(), ApiError> {
        let sites = self.sites.all().await?;
        self.site_options = sites.into_iter().map(|s| SelectionItem { display_text: s.name, value: s.id }).collect();

        Ok(())
    }

    pub fn site_options(&self) -> &[SelectionItem<SiteId>] {
        &self.site_options
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_site_ids(&mut self, site_ids: Vec<SiteId>) {
        self.site_ids = site_ids;
    }

    pub fn email_error(&self) -> Option<InputValidationError> {
        self.email_error
    }

    pub fn generate_link_error(&self) -> Option<&'static str> {
        self.generate_link_error
    }

    pub fn invitation_link(&self) -> Option<&str> {
        self.invitation_link.as_deref()
    }

    /// Runs on blur as well as before submitting.
    pub fn validate_email(&mut self) -> bool {
        self.email_error = validators::validate_email(&self.email).err();
        self.email_error.is_none()
    }

    pub async fn generate_link(&mut self) -> Result<String, InvitationError> {
        if !self.validate_email() {
            return Err(InvitationError::Validation(self.email_error.unwrap_or(InputValidationError::Required)));
        }

        let payload = CreateUserInvitation { email: self.email.clone(), site_ids: self.site_ids.clone() };
        match self.invitations.create(&payload).await {
            Ok(invitation) => {
                let link = format!("{}/register?code={}", self.app_base_url, invitation.code);
                info!(email = %self.email, sites = ?self.site_ids, "invitation generated");

                self.generate_link_error = None;
                self.invitation_link = Some(link.clone());
                Ok(link)
            }
            Err(e) => {
                warn!(email = %self.email, error = %e, "invitation failed");
                let err = InvitationError::from(e);

                self.generate_link_error = Some(err.message());
                Err(err)
            }
        }
    }

    /// Clears every field so the next opening starts blank.
    pub fn close(&mut self) {
        self.invitation_link = None;
        self.email.clear();
        self.site_ids.clear();
        self.email_error = None;
        self.generate_link_error = None;
    }
}
