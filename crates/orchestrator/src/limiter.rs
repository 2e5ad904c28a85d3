use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::{OrchestratorError, Result};

pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Counting semaphore capping how many workers are in flight at once.
///
/// A permit is acquired by the dispatcher before a worker is spawned and is
/// moved into the worker, which drops it after reporting its outcome.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyLimiter {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > Semaphore::MAX_PERMITS {
            return Err(OrchestratorError::InvalidConcurrency(capacity));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Wait until fewer than `capacity` permits are held, then take one.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| OrchestratorError::LimiterClosed)
    }
}
