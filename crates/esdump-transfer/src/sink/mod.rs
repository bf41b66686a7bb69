//! Consumers that drain a transfer queue

pub mod bulk;
pub mod file;

pub use bulk::{build_bulk_body, BulkSender};
pub use file::FileSink;

use crate::error::Result;
use async_trait::async_trait;

/// Destination of ordered batches
#[async_trait]
pub trait BatchSink: Send {
    type Item: Send;

    /// Handle one batch. An error aborts the transfer.
    async fn write_batch(&mut self, batch: Vec<Self::Item>) -> Result<()>;

    /// Flush whatever is buffered. Called once after the last batch.
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Items accepted by the destination so far
    fn transferred(&self) -> usize;

    /// Items rejected by the destination so far
    fn failed(&self) -> usize {
        0
    }
}

#[async_trait]
impl<'a, K: BatchSink + ?Sized> BatchSink for &'a mut K {
    type Item = K::Item;

    async fn write_batch(&mut self, batch: Vec<Self::Item>) -> Result<()> {
        (**self).write_batch(batch).await
    }

    async fn finish(&mut self) -> Result<()> {
        (**self).finish().await
    }

    fn transferred(&self) -> usize {
        (**self).transferred()
    }

    fn failed(&self) -> usize {
        (**self).failed()
    }
}
