use std::collections::BTreeMap;
use std::sync::Arc;

use repoforge_core::{ApiError, CreateRepoRequest, CreateRepoResponse};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::aggregator;
use crate::core::{AggregateStatus, BatchItem, Outcome, ResultRegistry};
use crate::error::{OrchestratorError, Result};
use crate::limiter::{ConcurrencyLimiter, DEFAULT_MAX_CONCURRENCY};
use crate::resources::OutcomeGuard;
use crate::services::RepoCreator;
use crate::worker;

/// Per-item results plus the aggregate status of an unbounded batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub status: AggregateStatus,
    pub status_code: u16,
    pub results: Vec<BatchItem>,
}

impl BatchReport {
    pub fn from_registry(registry: ResultRegistry) -> Self {
        let status = AggregateStatus::resolve(&registry);
        let status_code = status.representative_status(&registry);

        Self {
            status,
            status_code,
            results: registry.into_items(),
        }
    }
}

/// Result of a bounded batch, split into success and failure registries.
///
/// `succeeded` is keyed by the name GitHub confirmed and `failed` by the
/// submitted name. Requests sharing a name collapse to the later submission
/// in those maps; `results` always holds every item.
#[derive(Debug, Clone, Serialize)]
pub struct BulkReport {
    pub status: AggregateStatus,
    pub status_code: u16,
    pub succeeded: BTreeMap<String, CreateRepoResponse>,
    pub failed: BTreeMap<String, ApiError>,
    pub results: Vec<BatchItem>,
}

impl BulkReport {
    pub fn from_registry(registry: ResultRegistry) -> Self {
        let status = AggregateStatus::resolve(&registry);
        let status_code = status.representative_status(&registry);

        let mut succeeded = BTreeMap::new();
        let mut failed = BTreeMap::new();
        for item in registry.items() {
            match &item.outcome {
                Outcome::Success(response) => {
                    succeeded.insert(response.name.clone(), response.clone());
                }
                Outcome::Failure(error) => {
                    failed.insert(item.request.name.clone(), error.clone());
                }
            }
        }

        Self {
            status,
            status_code,
            succeeded,
            failed,
            results: registry.into_items(),
        }
    }
}

/// Fans repository requests out to concurrent workers and collects every outcome.
///
/// State lives only for the duration of one call; nothing is shared between
/// batches except the creator.
#[derive(Clone)]
pub struct BatchCreator {
    creator: Arc<dyn RepoCreator>,
    max_concurrency: usize,
}

impl BatchCreator {
    pub fn new(creator: Arc<dyn RepoCreator>) -> Self {
        Self {
            creator,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Result<Self> {
        ConcurrencyLimiter::new(max_concurrency)?;
        self.max_concurrency = max_concurrency;
        Ok(self)
    }

    /// Create a single repository without spawning.
    pub async fn create_repo(
        &self,
        client_id: &str,
        request: &CreateRepoRequest,
    ) -> std::result::Result<CreateRepoResponse, ApiError> {
        worker::execute(self.creator.as_ref(), client_id, request)
            .await
            .into_result()
    }

    /// Run every request concurrently, one worker each, with no cap.
    pub async fn create_repos(
        &self,
        client_id: &str,
        requests: Vec<CreateRepoRequest>,
    ) -> Result<BatchReport> {
        let registry = self.dispatch(client_id, requests, None).await?;
        Ok(BatchReport::from_registry(registry))
    }

    /// Run every request with at most `max_concurrency` workers in flight.
    pub async fn create_repos_bounded(
        &self,
        client_id: &str,
        requests: Vec<CreateRepoRequest>,
    ) -> Result<BulkReport> {
        let limiter = ConcurrencyLimiter::new(self.max_concurrency)?;
        let registry = self.dispatch(client_id, requests, Some(limiter)).await?;
        Ok(BulkReport::from_registry(registry))
    }

    /// Start the batch on its own task and wait for its registry.
    ///
    /// The batch task is detached from the caller: dropping the returned
    /// future stops the wait, not the workers, so every request still runs
    /// and reports.
    async fn dispatch(
        &self,
        client_id: &str,
        requests: Vec<CreateRepoRequest>,
        limiter: Option<ConcurrencyLimiter>,
    ) -> Result<ResultRegistry> {
        let span = info_span!(
            "batch",
            batch_id = %Uuid::new_v4(),
            client_id = %client_id,
            size = requests.len(),
            limit = limiter.as_ref().map(|l| l.capacity()),
        );

        let batch = tokio::spawn(
            run(
                Arc::clone(&self.creator),
                Arc::from(client_id),
                requests,
                limiter,
            )
            .instrument(span),
        );

        batch
            .await
            .map_err(|e| OrchestratorError::BatchTaskFailed(e.to_string()))?
    }
}

async fn run(
    creator: Arc<dyn RepoCreator>,
    client_id: Arc<str>,
    requests: Vec<CreateRepoRequest>,
    limiter: Option<ConcurrencyLimiter>,
) -> Result<ResultRegistry> {
    let expected = requests.len();
    info!("About to process {} requests", expected);

    let (sender, receiver) = mpsc::unbounded_channel();
    let collector = tokio::spawn(aggregator::collect(receiver, expected).in_current_span());

    let mut workers = JoinSet::new();
    for (index, request) in requests.into_iter().enumerate() {
        let permit = match &limiter {
            Some(limiter) => Some(limiter.acquire().await?),
            None => None,
        };

        let guard = OutcomeGuard::new(index, request, sender.clone());
        let creator = Arc::clone(&creator);
        let client_id = Arc::clone(&client_id);
        workers.spawn(
            async move {
                worker::run(creator, client_id, guard).await;
                drop(permit);
            }
            .in_current_span(),
        );
    }
    // Workers now hold the only senders; the channel closes after the last report.
    drop(sender);

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Repository worker task failed");
        }
    }

    let registry = collector
        .await
        .map_err(|e| OrchestratorError::AggregatorFailed(e.to_string()))??;

    info!(
        succeeded = registry.success_count(),
        failed = registry.len() - registry.success_count(),
        "Batch completed"
    );
    Ok(registry)
}
