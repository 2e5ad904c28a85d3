use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error};

use crate::core::{BatchItem, ResultRegistry};
use crate::error::Result;

/// Fan-in side of a batch: the only writer of the registry.
///
/// Drains `receiver` until every sender is gone, then freezes what it
/// collected. It never closes the channel itself; the channel closes when the
/// last worker drops its sender.
pub(crate) async fn collect(
    mut receiver: UnboundedReceiver<BatchItem>,
    expected: usize,
) -> Result<ResultRegistry> {
    let mut items = Vec::with_capacity(expected);

    while let Some(item) = receiver.recv().await {
        debug!(
            index = item.index,
            success = item.outcome.is_success(),
            received = items.len() + 1,
            expected,
            "Collected repository outcome"
        );
        items.push(item);
    }

    ResultRegistry::freeze(items, expected).map_err(|e| {
        error!(error = %e, "Batch outcomes are inconsistent");
        e
    })
}
