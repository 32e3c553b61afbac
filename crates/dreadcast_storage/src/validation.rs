//! Record checks shared by every backend.

use dreadcast_core::{Story, StoryDefect};
use dreadcast_error::{DreadcastResult, StorageError, StorageErrorKind};

/// Reject a story that could not be loaded back once written.
///
/// Backends call this before touching storage, so a failed save leaves the
/// store exactly as it was.
///
/// # Errors
///
/// [`StorageErrorKind::InvalidId`] for an identifier that is not a safe
/// filename, [`StorageErrorKind::Malformed`] for a blank body.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use dreadcast_core::StoryBuilder;
/// use dreadcast_storage::validate_story;
///
/// let story = StoryBuilder::default()
///     .id("abc")
///     .title("Empty")
///     .body("   ")
///     .score(1)
///     .created_at(Utc::now())
///     .build()
///     .unwrap();
/// assert!(validate_story(&story).is_err());
/// ```
pub fn validate_story(story: &Story) -> DreadcastResult<()> {
    match story.defect() {
        None => Ok(()),
        Some(StoryDefect::UnsafeId) => {
            Err(StorageError::new(StorageErrorKind::InvalidId(story.id().to_string())).into())
        }
        Some(defect @ StoryDefect::EmptyBody) => Err(StorageError::new(
            StorageErrorKind::Malformed(format!("{}: {}", story.id(), defect)),
        )
        .into()),
    }
}
