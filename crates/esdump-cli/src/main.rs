//! esdump CLI - Main entry point

use clap::Parser;
use esdump_cli::{Cli, Commands, Config, DeleteCommand, DumpCommand, GenCommand, LoadCommand};
use esdump_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use esdump_transfer::{DumpOptions, GenerateOptions, LoadOptions, SearchQuery};
use std::process;
use std::time::Duration;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Verbose mode logs debug to the console, otherwise only warnings
    let base_log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("esdump".to_string())
        .build();

    // Environment variables take precedence
    let log_config = match base_log_config.clone().merge_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring invalid logging environment: {}", e);
            base_log_config
        }
    };

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {}", e);
            None
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config.with_host(cli.host.clone()).with_verbose(cli.verbose),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = execute_command(cli.command, &config).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(command: Commands, config: &Config) -> esdump_cli::Result<()> {
    match command {
        Commands::Dump { command } => match command {
            DumpCommand::Data {
                index,
                file,
                batch,
                limit,
                timeout,
                search_query,
                search_body,
            } => {
                let mut options = DumpOptions::new(index);
                if let Some(file) = file {
                    options.file = file;
                }
                options.page_size = batch;
                options.limit = limit;
                options.keep_alive = Duration::from_secs(timeout);
                options.query = SearchQuery::from_options(search_query, search_body);
                esdump_cli::commands::dump::data(config, options).await
            }
            DumpCommand::Mapping { index, file } => {
                esdump_cli::commands::dump::mapping(config, index, file).await
            }
        },

        Commands::Load { command } => match command {
            LoadCommand::Data {
                index,
                file,
                batch,
                limit,
                max_line_bytes,
                delete,
            } => {
                let mut options = LoadOptions::new(index);
                if let Some(file) = file {
                    options.file = file;
                }
                options.batch_size = batch;
                options.limit = limit;
                options.max_line_bytes = max_line_bytes.unwrap_or(config.max_line_bytes);
                options.delete_first = delete;
                esdump_cli::commands::load::data(config, options).await
            }
            LoadCommand::Mapping {
                index,
                file,
                delete,
            } => esdump_cli::commands::load::mapping(config, index, file, delete).await,
        },

        Commands::Delete { command } => match command {
            DeleteCommand::Index { index } => {
                esdump_cli::commands::delete::index(config, index).await
            }
        },

        Commands::Gen { command } => match command {
            GenCommand::Testdata {
                index,
                epoch,
                batch,
                delete,
            } => {
                let options = GenerateOptions {
                    epochs: epoch,
                    batch_size: batch,
                    delete_first: delete,
                    ..GenerateOptions::new(index)
                };
                esdump_cli::commands::generate::testdata(config, options).await
            }
        },
    }
}
