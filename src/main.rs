//! Context Engine CLI entry point.

use anyhow::Context;
use clap::Parser;

use context_engine::cli::{Cli, Commands};
use context_engine::infrastructure::config::ConfigLoader;
use context_engine::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => context_engine::cli::handle_error(err, cli.json),
    };

    let logger = LogConfig::try_from(&config.logging)
        .and_then(|log_config| LoggerImpl::init(&log_config))
        .context("Failed to initialize logging");
    // Dropping the logger flushes the file writer, so it lives until exit.
    let _logger = match logger {
        Ok(logger) => logger,
        Err(err) => context_engine::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Run(args) => context_engine::cli::commands::run::execute(args, config, cli.json).await,
        Commands::Once(args) => {
            context_engine::cli::commands::once::execute(args, config, cli.json).await
        }
        Commands::Config => context_engine::cli::commands::config::execute(config, cli.json).await,
    };

    if let Err(err) = result {
        context_engine::cli::handle_error(err, cli.json);
    }
}
