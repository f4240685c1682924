use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputValidationError {
    #[error("required")]
    Required,
    #[error("email")]
    Email,
}

impl InputValidationError {
    /// Locale key of the inline message shown under an email input.
    pub fn email_message_key(&self) -> &'static str {
        match self {
            InputValidationError::Required => "auth.email-error-required",
            InputValidationError::Email => "auth.email-error-format",
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn validate_email(email: &str) -> Result<(), InputValidationError> {
    if email.is_empty() {
        return Err(InputValidationError::Required);
    }
    if !is_valid_email(email) {
        return Err(InputValidationError::Email);
    }

    Ok(())
}
