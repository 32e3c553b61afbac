//! Filename helpers for narration artifacts.

use crate::StoryId;

const MAX_TITLE_CHARS: usize = 50;

/// Reduce a story title to something safe to embed in a filename.
///
/// Keeps alphanumerics, `_`, `-` and spaces, truncates to 50 characters,
/// trims, then turns spaces into underscores. Falls back to `untitled`.
///
/// # Examples
///
/// ```
/// use dreadcast_core::sanitize_title;
///
/// assert_eq!(sanitize_title("The Thing in the Attic!"), "The_Thing_in_the_Attic");
/// assert_eq!(sanitize_title("???"), "untitled");
/// ```
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .take(MAX_TITLE_CHARS)
        .collect();

    let cleaned = kept.trim().replace(' ', "_");
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

/// Base filename (no extension) shared by a story's audio and video artifacts.
///
/// # Examples
///
/// ```
/// use dreadcast_core::{artifact_stem, StoryId};
///
/// let id = StoryId::new("1abc23");
/// assert_eq!(artifact_stem("Don't look", &id), "Dont_look_1abc23");
/// ```
pub fn artifact_stem(title: &str, id: &StoryId) -> String {
    format!("{}_{}", sanitize_title(title), id)
}
