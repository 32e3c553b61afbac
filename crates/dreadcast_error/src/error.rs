//! Top-level error wrapper types.

use crate::{AdapterError, ConfigError, NotFoundError, StorageError};

/// Every error condition the pipeline can surface.
///
/// # Examples
///
/// ```
/// use dreadcast_error::{DreadcastError, DreadcastErrorKind, NotFoundError};
///
/// let err: DreadcastError = NotFoundError::new("xyz").into();
/// assert!(matches!(err.kind(), DreadcastErrorKind::NotFound(_)));
/// assert!(format!("{}", err).contains("Story not found"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DreadcastErrorKind {
    /// Store read/write/parse failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Identifier absent from the store
    #[from(NotFoundError)]
    NotFound(NotFoundError),
    /// Scraper, TTS vendor or encoder failure
    #[from(AdapterError)]
    Adapter(AdapterError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Dreadcast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use dreadcast_error::{ConfigError, ConfigErrorKind, DreadcastResult};
///
/// fn might_fail() -> DreadcastResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Invalid("missing field".to_string())))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Dreadcast Error: {}", _0)]
pub struct DreadcastError(Box<DreadcastErrorKind>);

impl DreadcastError {
    /// Create a new error from a kind.
    pub fn new(kind: DreadcastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DreadcastErrorKind {
        &self.0
    }

    /// True when the error means the referenced story does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), DreadcastErrorKind::NotFound(_))
    }
}

// Generic From implementation for any type that converts to DreadcastErrorKind
impl<T> From<T> for DreadcastError
where
    T: Into<DreadcastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Dreadcast operations.
pub type DreadcastResult<T> = std::result::Result<T, DreadcastError>;
