use std::sync::Arc;

use github::{ApiConfig, GitHubClient};
use orchestrator::{BatchCreator, RepoCreator, RepositoryService};

use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub batch: BatchCreator,
}

impl AppState {
    pub fn new(batch: BatchCreator) -> Self {
        Self { batch }
    }

    /// Wire the GitHub client and batch creator from settings.
    ///
    /// The token is taken from `GITHUB_TOKEN`; without it requests go out
    /// unauthenticated and GitHub answers 401.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_config = ApiConfig::new(settings.github.api_url.clone())
            .with_timeout(settings.github.timeout());

        let token = std::env::var("GITHUB_TOKEN").unwrap_or_default();
        let client = GitHubClient::new(&token, api_config)?;
        if !client.is_authenticated() {
            tracing::warn!("GITHUB_TOKEN is not set, GitHub requests will be unauthenticated");
        }

        let creator: Arc<dyn RepoCreator> = Arc::new(RepositoryService::new(client));
        let batch =
            BatchCreator::new(creator).with_max_concurrency(settings.batch.max_concurrency)?;

        Ok(Self::new(batch))
    }
}
