//! `esdump delete` command implementation

use crate::commands::redacted_host;
use crate::config::Config;
use crate::error::{CliError, Result};
use colored::Colorize;
use esdump_transfer::index as index_ops;

/// Delete `index`. A missing index only prints a notice.
pub async fn index(config: &Config, index: String) -> Result<()> {
    let client = config.client()?;

    let deleted = index_ops::delete_index(client.as_ref(), &index)
        .await
        .map_err(|e| CliError::from_transfer(e, &redacted_host(config)))?;

    if deleted {
        println!("{} index '{}'", "Deleted".green().bold(), index);
    } else {
        println!("Index '{}' does not exist, nothing to delete", index);
    }
    Ok(())
}
