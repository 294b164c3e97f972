//! Stream utilities for store notifications.
//!
//! Converts the store's broadcast channel into an async stream the UI can
//! poll from a spawned task.

use std::pin::Pin;

use futures::Stream;
use tokio::sync::broadcast;

use crate::store::StoreEvent;

/// A notification delivered to a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreNotice {
    /// A document was written.
    Changed(StoreEvent),
    /// The subscriber fell behind and missed writes; re-query everything.
    Resync,
}

impl StoreNotice {
    /// Whether a subscriber watching `workspace` under `path_prefix` should re-query.
    pub fn affects(&self, workspace: &str, path_prefix: &str) -> bool {
        match self {
            StoreNotice::Changed(event) => {
                event.workspace == workspace && event.path.starts_with(path_prefix)
            }
            StoreNotice::Resync => true,
        }
    }
}

/// Convert a store event receiver into an async stream of notices.
///
/// `Lagged` becomes a single `Resync` notice; the stream ends when the
/// store is dropped.
pub fn store_notices(
    mut rx: broadcast::Receiver<StoreEvent>,
) -> Pin<Box<dyn Stream<Item = StoreNotice> + Send>> {
    Box::pin(async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => yield StoreNotice::Changed(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "store subscriber lagged, requesting resync");
                    yield StoreNotice::Resync;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
