//! Armada - batch SSH inventory tool
//!
//! CLI entry point that dispatches to subcommands.

use armada::cli::{Cli, Commands};
use armada::config::ConfigManager;
use armada::error::ArmadaResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ArmadaResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("armada=warn"),
        1 => EnvFilter::new("armada=info"),
        _ => EnvFilter::new("armada=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let config = config_manager.load().await?;

    match cli.command {
        Commands::List(args) => armada::cli::commands::list(args, &config).await,
        Commands::Check(args) => armada::cli::commands::check(args, &config).await,
        Commands::Cache(args) => armada::cli::commands::cache(args, &config).await,
        Commands::Config(args) => armada::cli::commands::config(args, &config_manager).await,
    }
}
