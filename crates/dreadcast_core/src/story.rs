//! The story record and its identifier.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Identifier of a story, taken from the source post id.
///
/// # Examples
///
/// ```
/// use dreadcast_core::StoryId;
///
/// let id = StoryId::new("1abc23");
/// assert_eq!(id.as_str(), "1abc23");
/// assert!(id.is_storage_safe());
/// assert!(!StoryId::new("../etc").is_storage_safe());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct StoryId(String);

impl StoryId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id can be used directly as a filename stem.
    ///
    /// Only ASCII alphanumerics, `_` and `-` are allowed, and the id must not be empty.
    pub fn is_storage_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Why a story cannot be stored or narrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StoryDefect {
    /// The identifier is not usable as a filename
    #[display("unusable identifier")]
    UnsafeId,
    /// Nothing to narrate
    #[display("empty body text")]
    EmptyBody,
}

/// A persisted unit of scraped content plus its narration status.
///
/// The `processed` flag only ever moves from `false` to `true`; use
/// [`Story::mark_processed`] rather than rebuilding the record.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use dreadcast_core::StoryBuilder;
///
/// let story = StoryBuilder::default()
///     .id("1abc23")
///     .title("The Thing in the Attic")
///     .body("It started with scratching.")
///     .score(412)
///     .created_at(Utc::now())
///     .build()
///     .unwrap();
///
/// assert!(!story.processed());
/// assert_eq!(story.id().as_str(), "1abc23");
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Story {
    /// Source post id.
    id: StoryId,

    /// Post title.
    title: String,

    /// Post body text (Reddit selftext).
    body: String,

    /// Post score, used as rank.
    score: i64,

    /// Whether narration has completed.
    #[builder(default)]
    #[serde(default)]
    #[getter(skip)]
    processed: bool,

    /// When the record was created by the scraper.
    created_at: DateTime<Utc>,

    /// Post author.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,

    /// Link to the post.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permalink: Option<String>,

    /// Comment count at fetch time.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_comments: Option<u64>,

    /// Upvote ratio at fetch time.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upvote_ratio: Option<f64>,

    /// When the post was published on the source.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    posted_at: Option<DateTime<Utc>>,

    /// When narration completed.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    processed_at: Option<DateTime<Utc>>,
}

impl Story {
    /// Whether narration has completed for this story.
    pub fn processed(&self) -> bool {
        self.processed
    }

    /// Transition to processed. Calling this on a processed story keeps the
    /// first `processed_at`.
    pub fn mark_processed(&mut self, at: DateTime<Utc>) {
        if !self.processed {
            self.processed = true;
            self.processed_at = Some(at);
        }
    }

    /// Carry the processed state of a previously stored copy forward, so an
    /// overwrite can never revert the flag.
    pub fn inherit_processed(&mut self, previous: &Story) {
        if previous.processed {
            self.processed = true;
            self.processed_at = previous.processed_at.or(self.processed_at);
        }
    }

    /// First invariant this record violates, if any.
    ///
    /// Every stored record must have a storage-safe id and a body that is
    /// not blank.
    pub fn defect(&self) -> Option<StoryDefect> {
        if !self.id.is_storage_safe() {
            Some(StoryDefect::UnsafeId)
        } else if self.body.trim().is_empty() {
            Some(StoryDefect::EmptyBody)
        } else {
            None
        }
    }

    /// Base filename for this story's narration artifacts.
    pub fn artifact_stem(&self) -> String {
        crate::artifact_stem(&self.title, &self.id)
    }
}
