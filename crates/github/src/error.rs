use thiserror::Error;

const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        documentation_url: Option<String>,
    },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GitHubError {
    /// HTTP status to report for this failure. Only errors returned by the
    /// GitHub API carry their own status; everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            GitHubError::Api { status, .. } => *status,
            _ => STATUS_INTERNAL_SERVER_ERROR,
        }
    }

    /// The bare message, without the variant prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            GitHubError::Api { message, .. } => message,
            GitHubError::Authentication(msg)
            | GitHubError::Config(msg)
            | GitHubError::Network(msg)
            | GitHubError::InvalidResponse(msg) => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;
