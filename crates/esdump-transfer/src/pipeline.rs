//! Transfer drivers
//!
//! Every transfer runs exactly two tasks: a producer spawned onto the runtime
//! and the consumer loop in the caller's own future. They meet at a
//! [`TransferQueue`]. When the consumer fails it cancels the producer and
//! closes the queue; when the producer fails the consumer first drains what
//! was already buffered and then reports the error.

use crate::backend::{ScrollRequest, SearchBackend, SearchQuery};
use crate::error::{Result, TransferError};
use crate::index;
use crate::queue::TransferQueue;
use crate::sink::{BatchSink, BulkSender, FileSink};
use crate::source::{self, BatchSource, CursorReader, Generator, LineReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Default documents per scroll page or bulk request.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default scroll cursor lifetime in seconds.
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;

/// Default number of synthetic batches.
pub const DEFAULT_EPOCHS: usize = 10;

/// Default synthetic batch size.
pub const DEFAULT_GENERATE_BATCH_SIZE: usize = 100;

/// Result of one transfer.
///
/// Counts stay meaningful when `error` is set: everything counted was
/// written before the transfer stopped.
#[derive(Debug, Default)]
pub struct TransferOutcome {
    pub items_transferred: usize,
    pub items_failed: usize,
    pub error: Option<TransferError>,
}

impl TransferOutcome {
    fn failed(error: TransferError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Options of an index export
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub index: String,
    pub file: PathBuf,
    pub page_size: usize,
    pub limit: Option<usize>,
    pub keep_alive: Duration,
    pub query: SearchQuery,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            index: String::new(),
            file: PathBuf::new(),
            page_size: DEFAULT_BATCH_SIZE,
            limit: None,
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
            query: SearchQuery::default(),
        }
    }
}

impl DumpOptions {
    /// Export `index` into `{index}-data.json`.
    pub fn new(index: impl Into<String>) -> Self {
        let index = index.into();
        Self {
            file: PathBuf::from(format!("{}-data.json", index)),
            index,
            ..Default::default()
        }
    }
}

/// Options of an index import
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub index: String,
    pub file: PathBuf,
    pub batch_size: usize,
    pub limit: Option<usize>,
    pub max_line_bytes: usize,
    pub delete_first: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            index: String::new(),
            file: PathBuf::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            limit: None,
            max_line_bytes: source::lines::DEFAULT_MAX_LINE_BYTES,
            delete_first: false,
        }
    }
}

impl LoadOptions {
    /// Import `{index}-data.json` into `index`.
    pub fn new(index: impl Into<String>) -> Self {
        let index = index.into();
        Self {
            file: PathBuf::from(format!("{}-data.json", index)),
            index,
            ..Default::default()
        }
    }
}

/// Options of a synthetic load
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub index: String,
    pub epochs: usize,
    pub batch_size: usize,
    pub delete_first: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            index: String::new(),
            epochs: DEFAULT_EPOCHS,
            batch_size: DEFAULT_GENERATE_BATCH_SIZE,
            delete_first: false,
        }
    }
}

impl GenerateOptions {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }
}

fn require_index(index: &str) -> Result<()> {
    if index.trim().is_empty() {
        return Err(TransferError::invalid_option("index name must not be empty"));
    }
    Ok(())
}

/// Move everything `source` produces into `sink`.
///
/// `pop_limit` caps the items handed to one `write_batch` call (`0` hands
/// over everything buffered).
pub async fn run_transfer<S, K>(source: S, mut sink: K, pop_limit: usize) -> TransferOutcome
where
    S: BatchSource + 'static,
    S::Item: 'static,
    K: BatchSink<Item = S::Item>,
{
    let start = Instant::now();
    let source_name = source.name();
    let queue = Arc::new(TransferQueue::new());
    let cancel = CancellationToken::new();

    let producer = tokio::spawn(source::produce(source, Arc::clone(&queue), cancel.clone()));

    let mut error = loop {
        let batch = match queue.pop(pop_limit).await {
            Ok(batch) if batch.is_empty() => break None,
            Ok(batch) => batch,
            Err(err) => break Some(err),
        };

        if let Err(err) = sink.write_batch(batch).await {
            cancel.cancel();
            queue.close();
            break Some(err);
        }
    };

    if let Err(err) = sink.finish().await {
        if error.is_none() {
            error = Some(err);
        } else {
            warn!(error = %err, "Failed to flush after transfer error");
        }
    }

    if let Err(join_err) = producer.await {
        let err = TransferError::Task(join_err.to_string());
        if error.is_none() {
            error = Some(err);
        } else {
            warn!(error = %err, "Producer task ended abnormally");
        }
    }

    let outcome = TransferOutcome {
        items_transferred: sink.transferred(),
        items_failed: sink.failed(),
        error,
    };

    info!(
        source = source_name,
        transferred = outcome.items_transferred,
        failed = outcome.items_failed,
        success = outcome.is_success(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Transfer finished"
    );
    outcome
}

/// Export an index into a line-delimited file of raw hits.
pub async fn dump_data(backend: Arc<dyn SearchBackend>, options: &DumpOptions) -> TransferOutcome {
    if let Err(err) = require_index(&options.index) {
        return TransferOutcome::failed(err);
    }

    let request = ScrollRequest {
        index: options.index.clone(),
        page_size: options.page_size,
        keep_alive: options.keep_alive,
        query: options.query.clone(),
    };
    let reader = match CursorReader::new(backend, request) {
        Ok(reader) => reader.with_limit(options.limit),
        Err(err) => return TransferOutcome::failed(err),
    };

    info!(index = %options.index, path = %options.file.display(), "Dumping index data");
    run_transfer(reader, FileSink::new(&options.file), 0).await
}

/// Import a line-delimited file into an index with bulk creates.
pub async fn load_data(backend: Arc<dyn SearchBackend>, options: &LoadOptions) -> TransferOutcome {
    if let Err(err) = require_index(&options.index) {
        return TransferOutcome::failed(err);
    }

    if options.delete_first {
        if let Err(err) = index::delete_index(backend.as_ref(), &options.index).await {
            return TransferOutcome::failed(err);
        }
    }

    let reader = match LineReader::open(&options.file, options.batch_size, options.max_line_bytes).await {
        Ok(reader) => reader.with_limit(options.limit),
        Err(err) => return TransferOutcome::failed(err),
    };

    info!(index = %options.index, path = %options.file.display(), "Loading index data");
    let sender = BulkSender::new(backend, options.index.clone());
    run_transfer(reader, sender, options.batch_size).await
}

/// Bulk-create synthetic documents into an index.
pub async fn generate_data(backend: Arc<dyn SearchBackend>, options: &GenerateOptions) -> TransferOutcome {
    if let Err(err) = require_index(&options.index) {
        return TransferOutcome::failed(err);
    }

    let generator = match Generator::new(options.epochs, options.batch_size) {
        Ok(generator) => generator,
        Err(err) => return TransferOutcome::failed(err),
    };

    if options.delete_first {
        if let Err(err) = index::delete_index(backend.as_ref(), &options.index).await {
            return TransferOutcome::failed(err);
        }
    }

    info!(index = %options.index, total = generator.total(), "Generating test data");
    let sender = BulkSender::new(backend, options.index.clone());
    run_transfer(generator, sender, options.batch_size).await
}
