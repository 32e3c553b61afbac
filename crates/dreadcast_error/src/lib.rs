//! Error types for the Dreadcast pipeline.
//!
//! This crate provides the error taxonomy shared by every Dreadcast crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Everything converts into [`DreadcastError`], so callers can use `?` freely.
//!
//! # Examples
//!
//! ```
//! use dreadcast_error::{DreadcastResult, NotFoundError};
//!
//! fn find_story(id: &str) -> DreadcastResult<String> {
//!     Err(NotFoundError::new(id))?
//! }
//!
//! assert!(find_story("abc123").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod config;
mod error;
mod not_found;
mod storage;

pub use adapter::{AdapterError, AdapterErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{DreadcastError, DreadcastErrorKind, DreadcastResult};
pub use not_found::NotFoundError;
pub use storage::{StorageError, StorageErrorKind};
