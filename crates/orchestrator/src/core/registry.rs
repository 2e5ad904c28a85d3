use repoforge_core::ApiError;

use super::outcome::BatchItem;
use crate::error::{OrchestratorError, Result};

/// The frozen set of outcomes for one batch, ordered by submission index.
///
/// Only the aggregator can build one, and only after the completion channel
/// has closed, so holding a `ResultRegistry` means aggregation is finished.
#[derive(Debug, Clone)]
pub struct ResultRegistry {
    items: Vec<BatchItem>,
}

impl ResultRegistry {
    /// Freeze outcomes collected in completion order.
    ///
    /// Fails unless every index in `0..expected` is present exactly once.
    pub(crate) fn freeze(mut items: Vec<BatchItem>, expected: usize) -> Result<Self> {
        if items.len() != expected {
            return Err(OrchestratorError::OutcomeCountMismatch {
                expected,
                collected: items.len(),
            });
        }

        items.sort_by_key(|item| item.index);
        if let Some((position, _)) = items
            .iter()
            .enumerate()
            .find(|(position, item)| item.index != *position)
        {
            return Err(OrchestratorError::InconsistentOutcomes(position));
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<BatchItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.items.iter().filter(|item| item.outcome.is_success()).count()
    }

    /// First failure in submission order.
    pub fn first_failure(&self) -> Option<&ApiError> {
        self.items.iter().find_map(|item| item.outcome.error())
    }
}
