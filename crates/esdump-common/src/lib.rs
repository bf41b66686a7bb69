//! esdump Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the esdump workspace.
//!
//! # Overview
//!
//! This crate provides functionality used by both the transfer engine and the CLI:
//!
//! - **Error Handling**: Common error type and result alias
//! - **Types**: The [`Document`](types::Document) record moved by load/generate transfers
//! - **Mapping**: Sanitizer that strips server-assigned settings from an index definition
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use esdump_common::mapping;
//!
//! fn prepare(raw: &str) -> esdump_common::Result<String> {
//!     let clean = mapping::sanitize(raw)?;
//!     Ok(clean)
//! }
//! ```

pub mod error;
pub mod logging;
pub mod mapping;
pub mod types;

// Re-export commonly used types
pub use error::{CommonError, Result};
pub use types::Document;
