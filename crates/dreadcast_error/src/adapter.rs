//! External collaborator error types.
//!
//! Covers the Reddit fetch, the TTS vendor call and the video encoder. None of
//! these are retried; the error is surfaced to the caller as-is.

/// Failure conditions reported by an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AdapterErrorKind {
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message or response body excerpt
        message: String,
    },
    /// Connection, DNS or timeout failure before a response arrived
    #[display("Network error: {}", _0)]
    Network(String),
    /// Response arrived but could not be understood
    #[display("Invalid response: {}", _0)]
    InvalidResponse(String),
    /// API key not configured
    #[display("API key not configured (set GEMINI_API_KEY or narration.api_key)")]
    MissingApiKey,
    /// Request parameters rejected before sending
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
    /// Audio artifact could not be decoded or written
    #[display("Audio error: {}", _0)]
    Audio(String),
    /// External video encoder failed
    #[display("Encoder error: {}", _0)]
    Encoder(String),
}

/// Adapter error with source location tracking.
///
/// # Examples
///
/// ```
/// use dreadcast_error::{AdapterError, AdapterErrorKind};
///
/// let err = AdapterError::new(AdapterErrorKind::Http {
///     status_code: 429,
///     message: "Too Many Requests".to_string(),
/// });
/// assert!(format!("{}", err).contains("HTTP 429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Adapter Error: {} at line {} in {}", kind, line, file)]
pub struct AdapterError {
    /// The kind of error that occurred
    pub kind: AdapterErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AdapterError {
    /// Create a new AdapterError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AdapterErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
