//! Scroll cursor reader for exports

use crate::backend::{ScrollPage, ScrollRequest, SearchBackend};
use crate::error::{Result, TransferError};
use crate::source::BatchSource;
use async_trait::async_trait;
use serde_json::value::RawValue;
use std::sync::Arc;
use tracing::{debug, warn};

enum CursorState {
    Init,
    Paging(String),
    /// More pages were expected but the backend gave no cursor
    Orphaned,
    Done,
}

/// Pages through an index with a server-side scroll cursor.
///
/// Each page becomes one batch of raw hits. The read ends on an empty page,
/// a page shorter than the requested size, or when the optional limit is hit
/// (the last page is truncated to fit). The cursor is released once the read
/// ends.
pub struct CursorReader {
    backend: Arc<dyn SearchBackend>,
    request: ScrollRequest,
    limit: Option<usize>,
    emitted: usize,
    state: CursorState,
}

impl CursorReader {
    pub fn new(backend: Arc<dyn SearchBackend>, request: ScrollRequest) -> Result<Self> {
        if request.page_size == 0 {
            return Err(TransferError::invalid_option("page size must be at least 1"));
        }
        Ok(Self {
            backend,
            request,
            limit: None,
            emitted: 0,
            state: CursorState::Init,
        })
    }

    /// Stop after `limit` hits. Zero means no limit.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&l| l > 0);
        self
    }

    /// Hits handed out so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.emitted >= limit)
    }

    async fn fetch(&mut self) -> Result<Option<ScrollPage>> {
        let page = match std::mem::replace(&mut self.state, CursorState::Done) {
            CursorState::Init => {
                debug!(index = %self.request.index, size = self.request.page_size, "Starting scroll");
                self.backend.open_scroll(&self.request).await?
            }
            CursorState::Paging(scroll_id) => {
                self.backend
                    .next_scroll(&scroll_id, self.request.keep_alive)
                    .await?
            }
            CursorState::Orphaned => {
                return Err(TransferError::MissingCursor(self.request.index.clone()));
            }
            CursorState::Done => return Ok(None),
        };
        Ok(Some(page))
    }

    /// Best-effort cursor release; the server expires it anyway.
    async fn release(&self, scroll_id: Option<String>) {
        let Some(scroll_id) = scroll_id else {
            return;
        };
        if let Err(err) = self.backend.clear_scroll(&scroll_id).await {
            warn!(index = %self.request.index, error = %err, "Failed to clear scroll cursor");
        }
    }
}

#[async_trait]
impl BatchSource for CursorReader {
    type Item = Box<RawValue>;

    async fn next_batch(&mut self) -> Result<Option<Vec<Box<RawValue>>>> {
        if self.limit_reached() {
            self.state = CursorState::Done;
            return Ok(None);
        }

        let Some(page) = self.fetch().await? else {
            return Ok(None);
        };

        let scroll_id = page.scroll_id.clone();
        if page.is_empty() {
            debug!(index = %self.request.index, total = self.emitted, "Scroll exhausted");
            self.release(scroll_id).await;
            return Ok(None);
        }

        let short_page = page.len() < self.request.page_size;
        let mut hits = page.into_hits();

        let mut done = short_page;
        if let Some(limit) = self.limit {
            let remaining = limit.saturating_sub(self.emitted);
            if hits.len() >= remaining {
                hits.truncate(remaining);
                done = true;
            }
        }
        self.emitted += hits.len();

        match scroll_id {
            Some(id) if !done => self.state = CursorState::Paging(id),
            None if !done => {
                warn!(index = %self.request.index, total = self.emitted, "Full page without a scroll id");
                self.state = CursorState::Orphaned;
            }
            scroll_id => {
                debug!(index = %self.request.index, total = self.emitted, "Scroll finished");
                self.release(scroll_id).await;
            }
        }

        Ok(Some(hits))
    }

    fn name(&self) -> &'static str {
        "cursor"
    }
}
