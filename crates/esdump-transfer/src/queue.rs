//! Hand-off queue between the producer and consumer of one transfer
//!
//! The queue is unbounded: `push` never waits, so a producer is paced only by
//! its own network or file I/O. The consumer waits in [`TransferQueue::pop`]
//! until items arrive, the stream ends, or the producer reports a fatal error.
//! Errors are delivered only after everything already buffered was drained.

use crate::error::{Result, TransferError};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::debug;

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
    failed: bool,
    error: Option<TransferError>,
}

/// FIFO buffer between exactly one producer and one consumer.
pub struct TransferQueue<T> {
    state: Mutex<QueueState<T>>,
    ready: Notify,
}

impl<T> Default for TransferQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TransferQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                closed: false,
                failed: false,
                error: None,
            }),
            ready: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a batch to the tail.
    ///
    /// Returns `false` without appending once the queue was closed or an error
    /// was reported; the producer must stop when that happens.
    pub fn push(&self, items: Vec<T>) -> bool {
        let mut state = self.lock();
        if state.closed || state.failed {
            return false;
        }
        if items.is_empty() {
            return true;
        }
        state.items.extend(items);
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Mark the end of the stream. Idempotent.
    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_one();
    }

    /// Latch a fatal error for the consumer.
    ///
    /// Buffered items are kept and handed out first. Only the first error is
    /// kept; later ones are dropped.
    pub fn push_error(&self, err: TransferError) {
        let mut state = self.lock();
        if state.failed {
            debug!(error = %err, "Dropping error reported after the first fatal error");
            return;
        }
        state.failed = true;
        state.error = Some(err);
        drop(state);
        self.ready.notify_one();
    }

    /// Wait for the next batch of at most `limit` items (`0` means everything
    /// buffered).
    ///
    /// An empty vector means end of stream. A latched error is returned once,
    /// after the buffer is empty; afterwards the queue reports end of stream.
    pub async fn pop(&self, limit: usize) -> Result<Vec<T>> {
        loop {
            if let Some(result) = self.try_pop(limit) {
                return result;
            }
            self.ready.notified().await;
        }
    }

    fn try_pop(&self, limit: usize) -> Option<Result<Vec<T>>> {
        let mut state = self.lock();

        if !state.items.is_empty() {
            let n = if limit == 0 {
                state.items.len()
            } else {
                limit.min(state.items.len())
            };
            return Some(Ok(state.items.drain(..n).collect()));
        }

        if let Some(err) = state.error.take() {
            state.closed = true;
            return Some(Err(err));
        }

        if state.closed || state.failed {
            return Some(Ok(Vec::new()));
        }

        None
    }
}
