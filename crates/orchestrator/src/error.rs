use thiserror::Error;

/// Faults of the batch machinery itself.
///
/// Per-repository failures are never reported through this type; they are
/// captured as [`crate::Outcome::Failure`] entries in the batch report.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Invalid concurrency limit: {0} (must be between 1 and {max})", max = tokio::sync::Semaphore::MAX_PERMITS)]
    InvalidConcurrency(usize),

    #[error("Concurrency limiter was closed while dispatching")]
    LimiterClosed,

    #[error("Batch task failed: {0}")]
    BatchTaskFailed(String),

    #[error("Result aggregator failed: {0}")]
    AggregatorFailed(String),

    #[error("Expected {expected} outcomes but collected {collected}")]
    OutcomeCountMismatch { expected: usize, collected: usize },

    #[error("Duplicate or missing outcome at index {0}")]
    InconsistentOutcomes(usize),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
