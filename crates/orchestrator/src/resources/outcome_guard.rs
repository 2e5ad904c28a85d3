//! RAII guard that guarantees a worker reports exactly one outcome.
//!
//! [`OutcomeGuard::report`] consumes the guard, so a second report cannot
//! be written. If the guard is dropped without reporting (the worker task
//! panicked or was torn down), `Drop` reports a failure in its place.

use repoforge_core::{ApiError, CreateRepoRequest};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::core::{BatchItem, Outcome};

pub const WORKER_LOST_MESSAGE: &str = "repository worker exited without reporting an outcome";

pub struct OutcomeGuard {
    index: usize,
    request: CreateRepoRequest,
    sender: Option<UnboundedSender<BatchItem>>,
}

impl OutcomeGuard {
    pub fn new(index: usize, request: CreateRepoRequest, sender: UnboundedSender<BatchItem>) -> Self {
        Self {
            index,
            request,
            sender: Some(sender),
        }
    }

    pub fn request(&self) -> &CreateRepoRequest {
        &self.request
    }

    /// Emit the outcome for this request and release the sender.
    pub fn report(mut self, outcome: Outcome) {
        debug!(
            index = self.index,
            success = outcome.is_success(),
            "Reporting repository outcome"
        );
        self.emit(outcome);
    }

    fn emit(&mut self, outcome: Outcome) {
        let Some(sender) = self.sender.take() else {
            return;
        };

        let item = BatchItem {
            index: self.index,
            request: std::mem::take(&mut self.request),
            outcome,
        };

        if sender.send(item).is_err() {
            warn!(index = self.index, "Outcome receiver dropped before report");
        }
    }
}

impl Drop for OutcomeGuard {
    fn drop(&mut self) {
        if self.sender.is_some() {
            warn!(
                index = self.index,
                repository = %self.request.name,
                "Outcome guard dropped without report - emitting failure"
            );

            self.emit(Outcome::Failure(ApiError::internal(WORKER_LOST_MESSAGE)));
        }
    }
}
