//! Line-delimited document reader for imports

use crate::error::{Result, TransferError};
use crate::source::BatchSource;
use async_trait::async_trait;
use esdump_common::Document;
use futures::StreamExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

/// Default upper bound for one line (1 GiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024 * 1024;

/// Reads one [`Document`] per non-empty line.
///
/// Lines longer than the configured maximum abort the read, as does a line
/// that is not a valid document. Errors carry the 1-based line number.
///
/// Documents read before a failing line are still returned; the error is
/// held back and reported by the following call.
pub struct LineReader<R> {
    lines: FramedRead<R, LinesCodec>,
    batch_size: usize,
    max_line_bytes: usize,
    limit: Option<usize>,
    line_number: u64,
    emitted: usize,
    pending: Option<TransferError>,
}

impl LineReader<File> {
    /// Open a dump file for reading.
    pub async fn open(
        path: impl AsRef<Path>,
        batch_size: usize,
        max_line_bytes: usize,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|e| TransferError::file(path.display().to_string(), e))?;
        Self::new(file, batch_size, max_line_bytes)
    }
}

impl<R: AsyncRead + Unpin + Send> LineReader<R> {
    pub fn new(reader: R, batch_size: usize, max_line_bytes: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(TransferError::invalid_option("read batch size must be at least 1"));
        }
        if max_line_bytes == 0 {
            return Err(TransferError::invalid_option("maximum line length must be at least 1"));
        }
        Ok(Self {
            lines: FramedRead::new(reader, LinesCodec::new_with_max_length(max_line_bytes)),
            batch_size,
            max_line_bytes,
            limit: None,
            line_number: 0,
            emitted: 0,
            pending: None,
        })
    }

    /// Stop after `limit` documents. Zero means no limit.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&l| l > 0);
        self
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.emitted >= limit)
    }

    fn parse(&self, line: &str) -> Result<Document> {
        serde_json::from_str(line).map_err(|e| TransferError::Parse {
            line: self.line_number,
            message: e.to_string(),
        })
    }

    /// Next document, skipping blank lines. `None` at end of input.
    async fn read_document(&mut self) -> Result<Option<Document>> {
        loop {
            let line = match self.lines.next().await {
                None => return Ok(None),
                Some(Ok(line)) => line,
                Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                    return Err(TransferError::LineTooLong {
                        line: self.line_number + 1,
                        max: self.max_line_bytes,
                    });
                }
                Some(Err(LinesCodecError::Io(err))) => return Err(err.into()),
            };
            self.line_number += 1;

            let line = line.trim();
            if !line.is_empty() {
                return self.parse(line).map(Some);
            }
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> BatchSource for LineReader<R> {
    type Item = Document;

    async fn next_batch(&mut self) -> Result<Option<Vec<Document>>> {
        if let Some(err) = self.pending.take() {
            return Err(err);
        }

        let mut batch = Vec::with_capacity(self.batch_size.min(1024));

        while batch.len() < self.batch_size && !self.limit_reached() {
            match self.read_document().await {
                Ok(Some(doc)) => {
                    batch.push(doc);
                    self.emitted += 1;
                }
                Ok(None) => break,
                Err(err) if batch.is_empty() => return Err(err),
                Err(err) => {
                    self.pending = Some(err);
                    break;
                }
            }
        }

        Ok(if batch.is_empty() { None } else { Some(batch) })
    }

    fn name(&self) -> &'static str {
        "lines"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: impl Into<String>, batch: usize, max: usize) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(input.into().into_bytes()), batch, max).unwrap()
    }

    fn hit(id: u32) -> String {
        format!(r#"{{"_index":"books","_type":"_doc","_id":"{}","_source":{{"n":{}}}}}"#, id, id)
    }

    #[tokio::test]
    async fn test_batches_follow_read_size() {
        let input: String = (1..=5).map(|i| hit(i) + "\n").collect();
        let mut reader = reader(input, 2, 1024);

        let mut sizes = Vec::new();
        let mut ids = Vec::new();
        while let Some(batch) = reader.next_batch().await.unwrap() {
            sizes.push(batch.len());
            ids.extend(batch.into_iter().map(|d| d.id));
        }

        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_blank_lines_and_crlf_are_skipped() {
        let mut reader = reader(
            "\n{\"_id\":\"a\",\"_source\":{}}\r\n\r\n   \n{\"_id\":\"b\",\"_source\":[1]}",
            10,
            1024,
        );

        let batch = reader.next_batch().await.unwrap().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].source.get(), "[1]");
        assert!(reader.next_batch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_parse_error_reports_line_number() {
        let mut reader = reader(
            "{\"_id\":\"a\",\"_source\":{}}\n\nnot json\n",
            10,
            1024,
        );

        let batch = reader.next_batch().await.unwrap().unwrap();
        assert_eq!(batch.len(), 1);

        match reader.next_batch().await {
            Err(TransferError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other.map(|b| b.map(|b| b.len()))),
        }
    }

    #[tokio::test]
    async fn test_overlong_line_is_fatal() {
        let mut reader = reader("{\"_id\":\"a\",\"_source\":{}}\n{\"_id\":\"bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\",\"_source\":{}}\n", 1, 32);

        assert_eq!(reader.next_batch().await.unwrap().unwrap().len(), 1);
        match reader.next_batch().await {
            Err(TransferError::LineTooLong { line, max }) => {
                assert_eq!(line, 2);
                assert_eq!(max, 32);
            }
            other => panic!("expected line too long, got {:?}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_documents_before_bad_line_are_returned() {
        let input = format!("{}\n{}\nnot json\n{}\n", hit(1), hit(2), hit(4));
        let mut reader = reader(input, 1000, 1024);

        let batch = reader.next_batch().await.unwrap().unwrap();
        let ids: Vec<_> = batch.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["1", "2"]);

        assert!(matches!(
            reader.next_batch().await,
            Err(TransferError::Parse { line: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_overlong_line_inside_batch_is_deferred() {
        let input = format!("{}\n{}\n", hit(1), "x".repeat(200));
        let mut reader = reader(input, 10, 128);

        assert_eq!(reader.next_batch().await.unwrap().unwrap().len(), 1);
        assert!(matches!(
            reader.next_batch().await,
            Err(TransferError::LineTooLong { line: 2, max: 128 })
        ));
    }

    #[tokio::test]
    async fn test_limit_stops_reading() {
        let input: String = (1..=10).map(|i| hit(i) + "\n").collect();
        let mut reader = reader(input, 4, 1024).with_limit(Some(6));

        let mut total = 0;
        while let Some(batch) = reader.next_batch().await.unwrap() {
            total += batch.len();
        }
        assert_eq!(total, 6);
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let err = LineReader::open("/definitely/not/here.json", 10, 1024)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
