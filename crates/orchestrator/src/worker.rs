use std::sync::Arc;

use repoforge_core::CreateRepoRequest;
use tracing::debug;

use crate::core::Outcome;
use crate::resources::OutcomeGuard;
use crate::services::RepoCreator;

/// Create one repository and classify the result.
///
/// Validation runs first; an invalid request never reaches `creator`.
pub async fn execute(
    creator: &dyn RepoCreator,
    client_id: &str,
    request: &CreateRepoRequest,
) -> Outcome {
    if let Err(err) = request.validate() {
        debug!(repository = %request.name, "Rejected repository request before remote call");
        return Outcome::Failure(err);
    }

    Outcome::from(creator.create_repo(client_id, request).await)
}

/// Body of one spawned worker task: run the request and report through the guard.
pub(crate) async fn run(
    creator: Arc<dyn RepoCreator>,
    client_id: Arc<str>,
    guard: OutcomeGuard,
) {
    let outcome = execute(creator.as_ref(), &client_id, guard.request()).await;
    guard.report(outcome);
}
