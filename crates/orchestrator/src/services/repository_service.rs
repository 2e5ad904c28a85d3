use async_trait::async_trait;
use github::GitHubClient;
use repoforge_core::{ApiError, CreateRepoRequest, CreateRepoResponse};
use tracing::{error, info};

/// Creates one repository on the remote service.
///
/// Implementations translate every transport or API failure into an
/// [`ApiError`]; nothing else leaks out.
#[async_trait]
pub trait RepoCreator: Send + Sync {
    /// `client_id` identifies the caller in logs; an empty id marks an
    /// anonymous caller.
    async fn create_repo(
        &self,
        client_id: &str,
        request: &CreateRepoRequest,
    ) -> Result<CreateRepoResponse, ApiError>;
}

/// [`RepoCreator`] backed by the GitHub REST API.
pub struct RepositoryService {
    client: GitHubClient,
}

impl RepositoryService {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    fn to_github_request(input: &CreateRepoRequest) -> github::CreateRepoRequest {
        github::CreateRepoRequest::new(input.trimmed_name())
            .with_description(input.description.clone())
            .private(input.private)
    }
}

#[async_trait]
impl RepoCreator for RepositoryService {
    async fn create_repo(
        &self,
        client_id: &str,
        input: &CreateRepoRequest,
    ) -> Result<CreateRepoResponse, ApiError> {
        input.validate()?;

        let request = Self::to_github_request(input);
        let authenticated = !client_id.is_empty();

        info!(
            client_id = %client_id,
            status = "pending",
            authenticated,
            repository = %request.name,
            "About to send request to external api"
        );

        let response = self.client.create_repo(&request).await.map_err(|e| {
            error!(
                client_id = %client_id,
                status = "error",
                authenticated,
                error = %e,
                "Response obtained from external api"
            );
            ApiError::new(e.status_code(), e.message())
        })?;

        info!(
            client_id = %client_id,
            status = "success",
            authenticated,
            repository_id = response.id,
            "Response obtained from external api"
        );

        Ok(CreateRepoResponse {
            id: response.id,
            name: response.name,
            owner: response.owner.login,
        })
    }
}
