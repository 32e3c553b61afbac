//! Dreadcast CLI binary.
//!
//! This binary provides command-line access to the pipeline:
//! - Fetch top stories from a subreddit into the story store
//! - Narrate the next unprocessed story (and optionally render video)
//! - Report progress and check the host setup

use clap::Parser;
use dreadcast::{DreadcastConfig, DreadcastResult, ObservabilityConfig, init_observability};
use std::process::ExitCode;

mod cli;

use cli::{Cli, Commands, run_check, run_fetch, run_next, run_process, run_status};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let observability = ObservabilityConfig::new()
        .with_verbose(cli.verbose)
        .with_json_logs(cli.json_logs);
    if let Err(e) = init_observability(&observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

/// Execute the requested command. `Ok(false)` means a check failed.
async fn run(cli: Cli) -> DreadcastResult<bool> {
    let config = DreadcastConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Fetch {
            subreddit,
            limit,
            window,
        } => run_fetch(&config, subreddit, limit, window).await?,

        Commands::Next { format } => run_next(&config, format).await?,

        Commands::Process { video, voice } => run_process(&config, video, voice).await?,

        Commands::Status { format } => run_status(&config, format).await?,

        Commands::Check { format } => return run_check(&config, format).await,
    }

    Ok(true)
}
