//! Bulk create sender for imports

use crate::backend::{BulkAction, BulkResponse, CreateAction, SearchBackend};
use crate::error::Result;
use crate::sink::BatchSink;
use async_trait::async_trait;
use esdump_common::Document;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Status the backend answers for a newly created document.
const CREATED: u16 = 201;

/// Build a newline-delimited bulk body with one `create` action per document.
///
/// The source is copied verbatim after its action line.
pub fn build_bulk_body(index: &str, documents: &[Document]) -> Result<Vec<u8>> {
    let mut body = Vec::with_capacity(documents.len() * 128);
    for doc in documents {
        let action = BulkAction {
            create: CreateAction {
                index,
                id: &doc.id,
                routing: doc.routing.as_deref(),
            },
        };
        serde_json::to_writer(&mut body, &action)?;
        body.push(b'\n');
        body.extend_from_slice(doc.source.get().as_bytes());
        body.push(b'\n');
    }
    Ok(body)
}

/// Sends each batch as one bulk request and tallies per-document results.
///
/// Rejected documents are logged and counted; only a failed request aborts.
pub struct BulkSender {
    backend: Arc<dyn SearchBackend>,
    index: String,
    succeeded: usize,
    failed: usize,
    requests: usize,
}

impl BulkSender {
    pub fn new(backend: Arc<dyn SearchBackend>, index: impl Into<String>) -> Self {
        Self {
            backend,
            index: index.into(),
            succeeded: 0,
            failed: 0,
            requests: 0,
        }
    }

    /// Match results to documents by position. Missing results are failures.
    fn reconcile(&mut self, batch: &[Document], response: BulkResponse) {
        let mut results = response.items.into_iter().map(|item| item.create);

        for doc in batch {
            match results.next().flatten() {
                Some(result) if result.status == CREATED => self.succeeded += 1,
                Some(result) => {
                    self.failed += 1;
                    let detail = result
                        .error
                        .as_ref()
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    warn!(
                        index = %self.index,
                        id = %doc.id,
                        status = result.status,
                        error = %detail,
                        "Document rejected"
                    );
                }
                None => {
                    self.failed += 1;
                    warn!(index = %self.index, id = %doc.id, "No bulk result for document");
                }
            }
        }
    }
}

#[async_trait]
impl BatchSink for BulkSender {
    type Item = Document;

    async fn write_batch(&mut self, batch: Vec<Document>) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let start = Instant::now();
        let body = build_bulk_body(&self.index, &batch)?;
        let response = self.backend.bulk(body).await?;
        self.requests += 1;

        let took_ms = response.took;
        let failed_before = self.failed;
        self.reconcile(&batch, response);

        debug!(
            index = %self.index,
            batch = self.requests,
            size = batch.len(),
            failed = self.failed - failed_before,
            total = self.succeeded,
            took_ms,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Bulk request done"
        );
        Ok(())
    }

    fn transferred(&self) -> usize {
        self.succeeded
    }

    fn failed(&self) -> usize {
        self.failed
    }
}
