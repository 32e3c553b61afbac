//! Story persistence and selection for Dreadcast.
//!
//! This crate provides the [`StoryStore`] backends and the selector that
//! decides which story gets narrated next.
//!
//! # Features
//!
//! - **One file per story**: `{stories_dir}/{id}.json`, pretty-printed
//! - **Atomic writes**: temp file + rename, so a record is either fully
//!   updated or the prior version remains
//! - **Fail-fast loading**: any malformed record aborts `load_all`
//! - **Validated saves**: a record that would not load back is refused
//! - **In-memory backend**: same contract, for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use dreadcast_storage::{FileSystemStoryStore, StoryStore, next_unprocessed};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemStoryStore::new("reddit_stories")?;
//!
//! if let Some(story) = next_unprocessed(&store).await? {
//!     println!("next up: {}", story.title());
//!     store.mark_processed(story.id()).await?;
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod selector;
mod validation;

pub use dreadcast_error::{StorageError, StorageErrorKind};
pub use dreadcast_interface::StoryStore;
pub use filesystem::FileSystemStoryStore;
pub use memory::InMemoryStoryStore;
pub use selector::{
    ProcessingStatus, StatusSummary, next_unprocessed, processing_status, select_next,
};
pub use validation::validate_story;
