//! Dump file writer

use crate::error::{Result, TransferError};
use crate::sink::BatchSink;
use async_trait::async_trait;
use serde_json::value::RawValue;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

/// Writes one raw hit per line.
///
/// The file is created (or truncated) on the first non-empty batch, so an
/// export that finds nothing leaves no file behind.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    written: usize,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            written: 0,
        }
    }

    fn io_error(&self, err: std::io::Error) -> TransferError {
        TransferError::file(self.path.display().to_string(), err)
    }

    async fn writer(&mut self) -> Result<&mut BufWriter<File>> {
        if self.writer.is_none() {
            let file = File::create(&self.path)
                .await
                .map_err(|e| self.io_error(e))?;
            debug!(path = %self.path.display(), "Created dump file");
            self.writer = Some(BufWriter::new(file));
        }
        self.writer
            .as_mut()
            .ok_or_else(|| TransferError::Task("dump file writer missing".to_string()))
    }
}

#[async_trait]
impl BatchSink for FileSink {
    type Item = Box<RawValue>;

    async fn write_batch(&mut self, batch: Vec<Box<RawValue>>) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let path = self.path.display().to_string();
        let writer = self.writer().await?;
        for hit in &batch {
            writer
                .write_all(hit.get().as_bytes())
                .await
                .map_err(|e| TransferError::file(path.clone(), e))?;
            writer
                .write_all(b"\n")
                .await
                .map_err(|e| TransferError::file(path.clone(), e))?;
        }

        self.written += batch.len();
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush().await {
                return Err(self.io_error(e));
            }
        }
        Ok(())
    }

    fn transferred(&self) -> usize {
        self.written
    }
}
