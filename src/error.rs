use thiserror::Error;

/// Twitter's error code for "Sorry, that page does not exist".
pub const NOT_FOUND_CODE: i64 = 34;

/// TwitterError represents errors caused while talking to the Twitter API.
#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("the client must be authenticated with OAuth credentials")]
    AuthenticationRequired,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Twitter is over capacity")]
    RemoteCapacity,
    #[error("Twitter returned a technical error page")]
    RemoteTechnical,
    #[error("could not decode the API response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Twitter API error{}: {message}", code.map(|c| format!(" {c}")).unwrap_or_default())]
    Api { code: Option<i64>, message: String },
    #[error("failed to request the API")]
    Http(#[from] reqwest::Error),
    #[error("the API responded with status {0}: {1}")]
    HttpStatus(u16, String),
    #[error("OAuth error: {0}")]
    OAuth(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("response cache error")]
    Cache(#[from] std::io::Error),
    #[error("could not parse the URL")]
    Url(#[from] url::ParseError),
}

impl TwitterError {
    /// True for the API error Twitter uses when the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code: Some(NOT_FOUND_CODE), .. })
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type TwitterResult<T> = Result<T, TwitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_includes_code() {
        let err = TwitterError::Api {
            code: Some(88),
            message: "Rate limit exceeded".to_owned(),
        };
        assert_eq!(err.to_string(), "Twitter API error 88: Rate limit exceeded");

        let err = TwitterError::Api {
            code: None,
            message: "Invalid or expired token".to_owned(),
        };
        assert_eq!(err.to_string(), "Twitter API error: Invalid or expired token");
    }

    #[test]
    fn only_code_34_is_not_found() {
        let found = TwitterError::Api {
            code: Some(34),
            message: "Sorry, that page does not exist".to_owned(),
        };
        let other = TwitterError::Api {
            code: Some(17),
            message: "No user matches for specified terms.".to_owned(),
        };
        assert!(found.is_not_found());
        assert!(!other.is_not_found());
        assert!(!TwitterError::RemoteCapacity.is_not_found());
    }
}
