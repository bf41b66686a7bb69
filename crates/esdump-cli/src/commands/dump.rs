//! `esdump dump` command implementation
//!
//! Exports index data or the index definition to a file.

use crate::commands::{finish_transfer, redacted_host};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress::create_spinner;
use colored::Colorize;
use esdump_transfer::{index, pipeline, DumpOptions};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Export documents of `options.index` into `options.file`
pub async fn data(config: &Config, options: DumpOptions) -> Result<()> {
    let client = config.client()?;
    info!(index = %options.index, path = %options.file.display(), "Starting dump");

    let started = Instant::now();
    let spinner = create_spinner(
        &format!("Dumping '{}' to {}", options.index, options.file.display()),
        !config.verbose,
    );
    let outcome = pipeline::dump_data(client, &options).await;
    spinner.finish_and_clear();

    finish_transfer(
        config,
        &format!("Dumped index '{}' to {}", options.index, options.file.display()),
        outcome,
        started,
    )
}

/// Export the definition of `index` into `file` (defaults to `<index>-mapping.json`)
pub async fn mapping(config: &Config, index: String, file: Option<PathBuf>) -> Result<()> {
    let client = config.client()?;
    let file = file.unwrap_or_else(|| PathBuf::from(format!("{}-mapping.json", index)));

    index::dump_mapping(client.as_ref(), &index, &file)
        .await
        .map_err(|e| CliError::from_transfer(e, &redacted_host(config)))?;

    println!(
        "{} definition of '{}' to {}",
        "Exported".green().bold(),
        index,
        file.display()
    );
    Ok(())
}
