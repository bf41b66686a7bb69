//! `esdump gen` command implementation

use crate::commands::finish_transfer;
use crate::config::Config;
use crate::error::Result;
use crate::progress::create_spinner;
use esdump_transfer::{pipeline, GenerateOptions};
use std::time::Instant;
use tracing::info;

/// Bulk-create `epochs × batch_size` synthetic documents into `options.index`
pub async fn testdata(config: &Config, options: GenerateOptions) -> Result<()> {
    let client = config.client()?;
    info!(
        index = %options.index,
        epochs = options.epochs,
        batch = options.batch_size,
        "Starting test data generation"
    );

    let started = Instant::now();
    let spinner = create_spinner(
        &format!("Generating test data into '{}'", options.index),
        !config.verbose,
    );
    let outcome = pipeline::generate_data(client, &options).await;
    spinner.finish_and_clear();

    finish_transfer(
        config,
        &format!("Generated test data into index '{}'", options.index),
        outcome,
        started,
    )
}
