//! Progress and summary output for CLI operations

use colored::Colorize;
use esdump_transfer::TransferOutcome;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for a running transfer.
///
/// Hidden when `enabled` is false, so verbose log lines are not interleaved
/// with spinner redraws.
pub fn create_spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Format an elapsed time as seconds with two decimals, or minutes and seconds.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let whole = elapsed.as_secs();
        format!("{}m{:02}s", whole / 60, whole % 60)
    }
}

/// Print the counts of a finished transfer.
pub fn print_summary(title: &str, outcome: &TransferOutcome, elapsed: Duration) {
    let status = if outcome.is_success() {
        title.green().bold()
    } else {
        title.red().bold()
    };

    println!("{}", status);
    println!("  Transferred: {}", outcome.items_transferred);
    println!("  Failed:      {}", outcome.items_failed);
    println!("  Elapsed:     {}", format_elapsed(elapsed));
}
