use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// Bad request parameters. Never retried.
    #[error("{0}")]
    InvalidInput(String),

    /// The channel identifier could not be mapped to a canonical channel id.
    #[error("{0}")]
    Resolution(String),

    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("YouTube API key is not configured")]
    MissingCredential,
}

pub type Result<T> = std::result::Result<T, AggregateError>;

impl AggregateError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution(message.into())
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// HTTP status the server answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Resolution(_) => 404,
            Self::Upstream {
                status: Some(code), ..
            } if (400..=599).contains(code) => *code,
            Self::Upstream { .. } | Self::MissingCredential => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<reqwest::Error> for AggregateError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs carry the API key; never let them into a message
        let err = err.without_url();
        let status = err.status().map(|s| s.as_u16());
        Self::Upstream {
            status,
            message: format!("upstream request failed: {}", err),
        }
    }
}
