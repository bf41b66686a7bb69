//! Synthetic document generator for load testing

use crate::error::{Result, TransferError};
use crate::source::BatchSource;
use async_trait::async_trait;
use esdump_common::Document;
use serde::Serialize;

#[derive(Serialize)]
struct SyntheticPayload {
    content: String,
    title: String,
    created_at: i64,
    updated_at: i64,
}

/// Emits `epochs` batches of `batch_size` documents with ids `id-1, id-2, ...`.
pub struct Generator {
    epochs: usize,
    batch_size: usize,
    total: usize,
    epoch: usize,
}

impl Generator {
    pub fn new(epochs: usize, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(TransferError::invalid_option("generator batch size must be at least 1"));
        }
        // The last id is `total`, so `total + 1` must still fit
        let total = epochs
            .checked_mul(batch_size)
            .filter(|total| total.checked_add(1).is_some())
            .ok_or_else(|| {
                TransferError::invalid_option(format!(
                    "{} epochs of {} documents is too many to generate",
                    epochs, batch_size
                ))
            })?;
        Ok(Self {
            epochs,
            batch_size,
            total,
            epoch: 0,
        })
    }

    /// Total number of documents this generator will emit
    pub fn total(&self) -> usize {
        self.total
    }

    fn document(n: usize, now_ms: i64) -> Result<Document> {
        let payload = SyntheticPayload {
            content: format!("content-{}", n),
            title: format!("title-{}", n),
            created_at: now_ms,
            updated_at: now_ms,
        };
        let source = serde_json::value::to_raw_value(&payload)?;
        Ok(Document::new(format!("id-{}", n), source))
    }
}

#[async_trait]
impl BatchSource for Generator {
    type Item = Document;

    async fn next_batch(&mut self) -> Result<Option<Vec<Document>>> {
        if self.epoch >= self.epochs {
            return Ok(None);
        }

        let now_ms = chrono::Utc::now().timestamp_millis();
        let first = self.epoch * self.batch_size + 1;
        let batch = (first..first + self.batch_size)
            .map(|n| Self::document(n, now_ms))
            .collect::<Result<Vec<_>>>()?;

        self.epoch += 1;
        Ok(Some(batch))
    }

    fn name(&self) -> &'static str {
        "generator"
    }
}
