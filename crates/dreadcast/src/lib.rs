//! Dreadcast - Reddit story narration pipeline
//!
//! Dreadcast fetches top text posts from a subreddit, keeps them as story
//! records on disk, and narrates them one at a time with text-to-speech,
//! optionally rendering a video of the narration.
//!
//! # Workflow
//!
//! 1. [`fetch_and_save`] pulls a listing through a [`StorySource`] and saves
//!    stories the [`StoryStore`] does not have yet.
//! 2. [`narrate_next`] selects the oldest unprocessed story, synthesizes it
//!    with a [`Narrator`], optionally encodes video, and marks it processed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dreadcast::{
//!     DreadcastConfig, FileSystemStoryStore, GeminiNarrator, narrate_next,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DreadcastConfig::load(None)?;
//! let store = FileSystemStoryStore::new(&config.paths.stories_dir)?;
//! let narrator = GeminiNarrator::new(config.narration.clone(), &config.paths.audio_dir)?;
//!
//! if let Some(outcome) = narrate_next(&store, &narrator, None).await? {
//!     println!("Narrated {}", outcome.story.title());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod check;
mod config;
mod observability;
mod workflow;

pub use check::{CheckItem, CheckReport, CheckStatus, self_check};
pub use config::{DreadcastConfig, PathsConfig};
pub use observability::{ObservabilityConfig, init_observability};
pub use workflow::{FetchReport, NarrationOutcome, VideoOutcome, fetch_and_save, narrate_next};

// Re-export the workspace crates
pub use dreadcast_core::{
    SegmentKind, Story, StoryBuilder, StoryDefect, StoryId, artifact_stem, sanitize_title,
    split_segments,
};
pub use dreadcast_error::{
    AdapterError, AdapterErrorKind, ConfigError, ConfigErrorKind, DreadcastError,
    DreadcastErrorKind, DreadcastResult, NotFoundError, StorageError, StorageErrorKind,
};
pub use dreadcast_interface::{
    AudioArtifact, AudioArtifactBuilder, Narrator, SegmentIllustrator, StorySegment, StorySource,
    StoryStore, VideoArtifact, VideoEncoder,
};
pub use dreadcast_narration::{
    FfmpegEncoder, GeminiNarrator, NarrationConfig, VideoConfig, plan_segments,
};
pub use dreadcast_reddit::{RedditClient, RedditConfig, TimeWindow};
pub use dreadcast_storage::{
    FileSystemStoryStore, InMemoryStoryStore, ProcessingStatus, StatusSummary, next_unprocessed,
    processing_status, validate_story,
};
