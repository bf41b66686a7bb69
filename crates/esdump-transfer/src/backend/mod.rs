//! Search backend access
//!
//! [`SearchBackend`] is the protocol the transfer engine needs from the remote
//! index. [`EsClient`] implements it over the Elasticsearch REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{EsClient, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use types::*;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote operations used by the pipelines and index commands.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run the initial scroll search and return its first page.
    async fn open_scroll(&self, request: &ScrollRequest) -> Result<ScrollPage>;

    /// Advance a scroll cursor, renewing its lifetime.
    async fn next_scroll(&self, scroll_id: &str, keep_alive: Duration) -> Result<ScrollPage>;

    /// Release a scroll cursor on the server.
    async fn clear_scroll(&self, scroll_id: &str) -> Result<()>;

    /// Submit a newline-delimited bulk body.
    async fn bulk(&self, body: Vec<u8>) -> Result<BulkResponse>;

    /// Fetch an index definition (aliases, mappings, settings) as raw JSON.
    async fn get_index(&self, index: &str) -> Result<String>;

    /// Create an index from a definition body.
    async fn create_index(&self, index: &str, definition: &str) -> Result<String>;

    /// Delete an index. A missing index yields [`TransferError::IndexNotFound`].
    ///
    /// [`TransferError::IndexNotFound`]: crate::error::TransferError::IndexNotFound
    async fn delete_index(&self, index: &str) -> Result<String>;
}
