//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to read a file or list the store directory
    #[display("Failed to read: {}", _0)]
    FileRead(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// A persisted record could not be decoded or failed validation
    #[display("Malformed story record: {}", _0)]
    Malformed(String),
    /// Identifier cannot be used as a storage key
    #[display("Invalid story identifier: {:?}", _0)]
    InvalidId(String),
    /// Failed to serialize a record before writing
    #[display("Failed to serialize record: {}", _0)]
    Serialization(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use dreadcast_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Malformed("abc.json".to_string()));
/// assert!(format!("{}", err).contains("Malformed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
