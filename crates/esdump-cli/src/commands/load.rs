//! `esdump load` command implementation
//!
//! Imports documents or an index definition from a file.

use crate::commands::{finish_transfer, redacted_host};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress::create_spinner;
use colored::Colorize;
use esdump_transfer::{index, pipeline, LoadOptions};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Import `options.file` into `options.index`
pub async fn data(config: &Config, options: LoadOptions) -> Result<()> {
    let client = config.client()?;
    info!(
        index = %options.index,
        path = %options.file.display(),
        batch = options.batch_size,
        delete = options.delete_first,
        "Starting load"
    );

    let started = Instant::now();
    let spinner = create_spinner(
        &format!("Loading {} into '{}'", options.file.display(), options.index),
        !config.verbose,
    );
    let outcome = pipeline::load_data(client, &options).await;
    spinner.finish_and_clear();

    finish_transfer(
        config,
        &format!("Loaded {} into index '{}'", options.file.display(), options.index),
        outcome,
        started,
    )
}

/// Create `index` from the definition in `file` (defaults to `<index>-mapping.json`)
pub async fn mapping(
    config: &Config,
    index: String,
    file: Option<PathBuf>,
    delete: bool,
) -> Result<()> {
    let client = config.client()?;
    let file = file.unwrap_or_else(|| PathBuf::from(format!("{}-mapping.json", index)));

    index::load_mapping(client.as_ref(), &index, &file, delete)
        .await
        .map_err(|e| CliError::from_transfer(e, &redacted_host(config)))?;

    println!(
        "{} index '{}' from {}",
        "Created".green().bold(),
        index,
        file.display()
    );
    Ok(())
}
