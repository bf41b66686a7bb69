//! CLI command implementations
//!
//! One module per top-level subcommand; each exposes one async function per
//! nested subcommand.

pub mod delete;
pub mod dump;
pub mod generate;
pub mod load;

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress;
use esdump_transfer::TransferOutcome;
use std::time::Instant;

/// Print the summary and turn a fatal transfer error into the command result.
pub(crate) fn finish_transfer(
    config: &Config,
    title: &str,
    outcome: TransferOutcome,
    started: Instant,
) -> Result<()> {
    progress::print_summary(title, &outcome, started.elapsed());

    match outcome.error {
        Some(err) => Err(CliError::from_transfer(err, &redacted_host(config))),
        None => Ok(()),
    }
}

/// Host for user-facing messages, without credentials.
pub(crate) fn redacted_host(config: &Config) -> String {
    match config.host.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{}://{}", scheme, host),
            None => config.host.clone(),
        },
        None => match config.host.rsplit_once('@') {
            Some((_, host)) => host.to_string(),
            None => config.host.clone(),
        },
    }
}
