//! esdump Transfer Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Streaming export and import between an Elasticsearch-compatible index and
//! line-delimited JSON files.
//!
//! # Transfers
//!
//! - **Dump**: scroll cursor pages are written to a file, one raw hit per line
//! - **Load**: file lines are parsed into documents and bulk-created
//! - **Generate**: synthetic documents are bulk-created for load testing
//!
//! Each transfer pairs a producer ([`source`]) with a consumer ([`sink`])
//! through an unbounded [`TransferQueue`].
//!
//! # Example
//!
//! ```no_run
//! use esdump_transfer::{backend::EsClient, pipeline::{self, DumpOptions}};
//! use std::{sync::Arc, time::Duration};
//!
//! #[tokio::main]
//! async fn main() -> esdump_transfer::Result<()> {
//!     let client = Arc::new(EsClient::new("http://localhost:9200", Duration::from_secs(300))?);
//!     let outcome = pipeline::dump_data(client, &DumpOptions::new("books")).await;
//!     println!("dumped {} documents", outcome.items_transferred);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod queue;
pub mod sink;
pub mod source;

// Re-export commonly used types
pub use backend::{EsClient, SearchBackend, SearchQuery};
pub use error::{Result, TransferError};
pub use pipeline::{DumpOptions, GenerateOptions, LoadOptions, TransferOutcome};
pub use queue::TransferQueue;
