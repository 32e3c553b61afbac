//! Logging setup for the binary.

use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log level filter used when `RUST_LOG` is unset (e.g., "info", "debug")
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Create a configuration at the `info` level with text output.
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch to `debug` when `verbose` is set.
    pub fn with_verbose(self, verbose: bool) -> Self {
        if verbose {
            self.with_log_level("debug")
        } else {
            self
        }
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// The filter this configuration installs.
    ///
    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error>> {
        match env::var("RUST_LOG") {
            Ok(directives) if !directives.trim().is_empty() => Ok(EnvFilter::try_new(directives)?),
            _ => Ok(EnvFilter::try_new(&self.log_level)?),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init_observability(config: &ObservabilityConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = config.env_filter()?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(
        level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}
