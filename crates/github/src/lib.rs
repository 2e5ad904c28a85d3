pub mod client;
pub mod error;
pub mod types;

pub use client::GitHubClient;
pub use error::{GitHubError, Result};
pub use types::{
    ApiConfig, CreateRepoRequest, CreateRepoResponse, GitHubErrorResponse, RepoOwner,
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS,
};
