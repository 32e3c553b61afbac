//! Configuration error types.

use std::path::{Path, PathBuf};

/// What went wrong while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigErrorKind {
    /// An explicitly requested file does not exist
    #[display("file not found")]
    FileNotFound,
    /// A source could not be read or merged
    #[display("cannot read: {}", _0)]
    Unreadable(String),
    /// The merged values do not fit the schema
    #[display("invalid value: {}", _0)]
    Invalid(String),
}

/// Configuration error naming the file it came from, when there is one.
///
/// # Examples
///
/// ```
/// use dreadcast_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::FileNotFound).in_file("/etc/dreadcast.toml");
/// assert!(err.to_string().contains("file not found (/etc/dreadcast.toml)"));
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Configuration file involved; `None` for merged or environment sources
    pub path: Option<PathBuf>,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            path: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the configuration file the error concerns.
    pub fn in_file(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration Error: {}", self.kind)?;
        if let Some(path) = &self.path {
            write!(f, " ({})", path.display())?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
