//! esdump CLI Library
//!
//! Command-line interface for moving Elasticsearch indexes to and from files.
//!
//! # Overview
//!
//! - **Export**: index data and index definitions to files (`esdump dump data|mapping`)
//! - **Import**: files back into an index (`esdump load data|mapping`)
//! - **Index management**: drop an index (`esdump delete index`)
//! - **Load testing**: bulk-create synthetic documents (`esdump gen testdata`)

pub mod commands;
pub mod config;
pub mod error;
pub mod progress;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// esdump - Elasticsearch dump and load tool
#[derive(Parser, Debug)]
#[command(name = "esdump")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Search backend URL: http://<user>:<password>@<host>:<port> [default: http://localhost:9200]
    #[arg(long, env = "ESDUMP_HOST", global = true)]
    pub host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export index data or definitions to a file
    Dump {
        #[command(subcommand)]
        command: DumpCommand,
    },

    /// Import index data or definitions from a file
    Load {
        #[command(subcommand)]
        command: LoadCommand,
    },

    /// Delete resources on the search backend
    Delete {
        #[command(subcommand)]
        command: DeleteCommand,
    },

    /// Generate synthetic data
    Gen {
        #[command(subcommand)]
        command: GenCommand,
    },
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum DumpCommand {
    /// Export documents, one search hit per line
    Data {
        /// Index name
        #[arg(long)]
        index: String,

        /// Output file (defaults to <index>-data.json)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Documents per scroll page
        #[arg(short, long, default_value = "1000")]
        batch: usize,

        /// Stop after this many documents
        #[arg(short, long)]
        limit: Option<usize>,

        /// Scroll cursor lifetime in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,

        /// Lucene query string selecting documents
        #[arg(short = 'q', long, conflicts_with = "search_body")]
        search_query: Option<String>,

        /// JSON search body selecting documents
        #[arg(short = 'd', long)]
        search_body: Option<String>,
    },

    /// Export the index definition (aliases, mappings, settings)
    Mapping {
        /// Index name
        #[arg(long)]
        index: String,

        /// Output file (defaults to <index>-mapping.json)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum LoadCommand {
    /// Import documents with bulk creates
    Data {
        /// Index name
        #[arg(long)]
        index: String,

        /// Input file (defaults to <index>-data.json)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Documents per bulk request
        #[arg(short, long, default_value = "1000")]
        batch: usize,

        /// Stop after this many documents
        #[arg(short, long)]
        limit: Option<usize>,

        /// Longest accepted input line in bytes [default: 1073741824]
        #[arg(long)]
        max_line_bytes: Option<usize>,

        /// Delete the index before loading
        #[arg(long)]
        delete: bool,
    },

    /// Create the index from an exported definition
    Mapping {
        /// Index name
        #[arg(long)]
        index: String,

        /// Input file (defaults to <index>-mapping.json)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Delete the index before creating it
        #[arg(long)]
        delete: bool,
    },
}

/// Delete subcommands
#[derive(Subcommand, Debug)]
pub enum DeleteCommand {
    /// Delete an index; a missing index is not an error
    Index {
        /// Index name
        #[arg(long)]
        index: String,
    },
}

/// Generate subcommands
#[derive(Subcommand, Debug)]
pub enum GenCommand {
    /// Bulk-create synthetic documents
    Testdata {
        /// Index name
        #[arg(long)]
        index: String,

        /// Number of batches
        #[arg(short, long, default_value = "10")]
        epoch: usize,

        /// Documents per batch
        #[arg(short, long, default_value = "100")]
        batch: usize,

        /// Delete the index before loading
        #[arg(long)]
        delete: bool,
    },
}
