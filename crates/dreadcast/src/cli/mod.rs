//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the dreadcast binary.

mod check;
mod commands;
mod narrate;
mod stories;

pub use check::run_check;
pub use commands::{Cli, Commands, OutputFormat};
pub use narrate::run_process;
pub use stories::{run_fetch, run_next, run_status};

use dreadcast::{DreadcastResult, StorageError, StorageErrorKind};
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> DreadcastResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
    println!("{}", json);
    Ok(())
}
