//! Missing-record error type.

/// An operation referenced a story identifier that is not in the store.
///
/// # Examples
///
/// ```
/// use dreadcast_error::NotFoundError;
///
/// let err = NotFoundError::new("1abc23");
/// assert_eq!(err.id, "1abc23");
/// assert!(format!("{}", err).contains("1abc23"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story not found: {} at line {} in {}", id, line, file)]
pub struct NotFoundError {
    /// The identifier that was looked up
    pub id: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl NotFoundError {
    /// Create a new NotFoundError for the given identifier at the current location.
    #[track_caller]
    pub fn new(id: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            id: id.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
