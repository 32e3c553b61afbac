//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use dreadcast::TimeWindow;
use std::path::PathBuf;

/// Dreadcast - fetch Reddit stories and narrate them with text-to-speech
#[derive(Parser, Debug)]
#[command(name = "dreadcast")]
#[command(about = "Fetch Reddit stories and narrate them with text-to-speech", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true, env = "DREADCAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch top posts and save the ones not already stored
    Fetch {
        /// Subreddit to fetch (defaults to reddit.subreddit)
        #[arg(long, short)]
        subreddit: Option<String>,

        /// Number of posts to request, 1-100 (defaults to reddit.limit)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Top listing time window (defaults to reddit.window)
        #[arg(long, short, value_parser = parse_window)]
        window: Option<TimeWindow>,
    },

    /// Show the next unprocessed story without narrating it
    Next {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Narrate the next unprocessed story and mark it processed
    Process {
        /// Also render an MP4 with FFmpeg
        #[arg(long)]
        video: bool,

        /// Prebuilt voice name (defaults to narration.voice)
        #[arg(long)]
        voice: Option<String>,
    },

    /// Show processed and unprocessed counts
    Status {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Check configuration, directories, API key and FFmpeg
    Check {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

fn parse_window(s: &str) -> Result<TimeWindow, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_package_metadata_is_our_own() {
        assert_eq!(env!("CARGO_PKG_AUTHORS"), "Dreadcast Developers");
        assert_eq!(env!("CARGO_PKG_REPOSITORY"), "");
    }

    #[test]
    fn test_fetch_arguments() {
        let cli = Cli::try_parse_from([
            "dreadcast",
            "fetch",
            "--subreddit",
            "nosleep",
            "--limit",
            "10",
            "--window",
            "month",
        ])
        .unwrap();

        match cli.command {
            Commands::Fetch {
                subreddit,
                limit,
                window,
            } => {
                assert_eq!(subreddit.as_deref(), Some("nosleep"));
                assert_eq!(limit, Some(10));
                assert_eq!(window, Some(TimeWindow::Month));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dreadcast", "status", "--format", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Status {
                format: OutputFormat::Json
            }
        ));
    }

    #[test]
    fn test_bad_window_rejected() {
        assert!(Cli::try_parse_from(["dreadcast", "fetch", "--window", "fortnight"]).is_err());
    }
}
