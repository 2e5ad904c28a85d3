use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::{debug, error, info};

use crate::error::{GitHubError, Result};
use crate::types::{ApiConfig, CreateRepoRequest, CreateRepoResponse, GitHubErrorResponse};

const CREATE_REPO_PATH: &str = "/user/repos";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("repoforge/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: reqwest::Client,
    config: ApiConfig,
    token: String,
}

impl GitHubClient {
    pub fn new(token: &str, config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GitHubError::Config(e.to_string()))?;

        Ok(Self {
            http,
            config,
            token: token.to_string(),
        })
    }

    pub fn from_env(config: ApiConfig) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| GitHubError::Authentication("GITHUB_TOKEN not set".to_string()))?;
        Self::new(&token, config)
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    fn authorization_header(&self) -> String {
        format!("token {}", self.token)
    }
}

impl GitHubClient {
    /// Create a repository owned by the authenticated user.
    pub async fn create_repo(&self, request: &CreateRepoRequest) -> Result<CreateRepoResponse> {
        let url = self.config.endpoint(CREATE_REPO_PATH);
        debug!(url = %url, repository = %request.name, "Creating GitHub repository");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.authorization_header())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Error when trying to create new repo in github");
                GitHubError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|_| GitHubError::InvalidResponse("invalid response body".to_string()))?;

        if status.as_u16() > 299 {
            let err: GitHubErrorResponse = serde_json::from_slice(&body).map_err(|_| {
                GitHubError::InvalidResponse("invalid json response body".to_string())
            })?;
            info!(
                status = status.as_u16(),
                message = %err.message,
                "GitHub rejected repository creation"
            );
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message: err.message,
                documentation_url: err.documentation_url,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!(error = %e, "Error when trying to unmarshal create repo successful response");
            GitHubError::InvalidResponse(
                "error when trying to unmarshal github create repo response".to_string(),
            )
        })
    }
}
