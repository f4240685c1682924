use thiserror::Error;

/// Failure of a single backend call.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {response}")]
    Status { status: u16, response: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Machine-readable error code sent by the backend, if any.
    ///
    /// The backend answers known failures with a bare JSON string
    /// (`"email_taken"`), so the quotes are stripped before comparing.
    pub fn code(&self) -> Option<String> {
        match self {
            ApiError::Status { response, .. } => Some(response.replace('"', "").trim().to_string()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by page-level actions.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("action requires admin rights on site {0}")]
    Forbidden(u64),

    #[error("post {0} is not loaded")]
    UnknownPost(u64),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strips_json_quotes() {
        let err = ApiError::Status { status: 400, response: "\"email_taken\"".into() };

        assert_eq!(err.code().as_deref(), Some("email_taken"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn decode_errors_have_no_code() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();

        assert!(err.code().is_none());
        assert!(err.status().is_none());
    }
}
