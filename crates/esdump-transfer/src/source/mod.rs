//! Producers that feed a transfer queue
//!
//! A producer is any [`BatchSource`]. [`produce`] drives one on a background
//! task, pushing each batch into the queue until the source is exhausted, the
//! consumer stops accepting, cancellation is requested, or the source fails.

pub mod cursor;
pub mod generator;
pub mod lines;

pub use cursor::CursorReader;
pub use generator::Generator;
pub use lines::LineReader;

use crate::error::Result;
use crate::queue::TransferQueue;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Source of ordered batches
#[async_trait]
pub trait BatchSource: Send {
    type Item: Send;

    /// Produce the next batch
    ///
    /// # Returns
    /// `Some(batch)` with at least one item, or `None` at end of stream.
    /// An error is fatal; the source is not polled again.
    async fn next_batch(&mut self) -> Result<Option<Vec<Self::Item>>>;

    /// Short name used in log fields
    fn name(&self) -> &'static str;
}

/// Run a source to completion, pushing into `queue`.
///
/// Closes the queue on normal completion and cancellation, and latches the
/// error on failure. Cancellation is checked between batches; a request that
/// is already running is allowed to finish.
pub async fn produce<S>(mut source: S, queue: Arc<TransferQueue<S::Item>>, cancel: CancellationToken)
where
    S: BatchSource,
{
    let name = source.name();
    let mut batches = 0usize;
    let mut items = 0usize;

    loop {
        if cancel.is_cancelled() {
            debug!(source = name, "Producer cancelled");
            break;
        }

        match source.next_batch().await {
            Ok(Some(batch)) => {
                let len = batch.len();
                if !queue.push(batch) {
                    debug!(source = name, "Queue stopped accepting, producer exiting");
                    break;
                }
                batches += 1;
                items += len;
                debug!(source = name, batch = batches, size = len, total = items, "Pushed batch");
            }
            Ok(None) => break,
            Err(err) => {
                warn!(source = name, error = %err, "Producer failed");
                queue.push_error(err);
                return;
            }
        }
    }

    debug!(source = name, batches, total = items, "Producer finished");
    queue.close();
}
