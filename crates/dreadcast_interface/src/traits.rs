//! Trait definitions for the story store and the external collaborators.

use crate::{AudioArtifact, StorySegment, VideoArtifact};
use async_trait::async_trait;
use dreadcast_core::{Story, StoryId};
use dreadcast_error::DreadcastResult;
use std::path::Path;

/// Persistence for story records.
///
/// The store exclusively owns persistence; nothing else writes story files.
/// It is constructed per invocation and passed explicitly to the workflows.
#[async_trait]
pub trait StoryStore: Send + Sync {
    /// Read every persisted record, ordered by creation time then identifier.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read or any
    /// record is malformed. Partial results are never returned.
    async fn load_all(&self) -> DreadcastResult<Vec<Story>>;

    /// Fetch a single record.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record has this identifier.
    async fn get(&self, id: &StoryId) -> DreadcastResult<Story>;

    /// Whether a record with this identifier exists.
    async fn contains(&self, id: &StoryId) -> DreadcastResult<bool>;

    /// Insert or overwrite the record with the story's identifier.
    ///
    /// An existing processed record stays processed.
    ///
    /// # Errors
    ///
    /// Returns a storage error on write failure; the prior version remains.
    async fn save(&self, story: &Story) -> DreadcastResult<()>;

    /// Set `processed = true` on a record and persist it.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the identifier is absent, leaving the
    /// store unchanged.
    async fn mark_processed(&self, id: &StoryId) -> DreadcastResult<Story>;
}

/// Source of candidate stories (the scraper side).
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Fetch the top posts of a community as fresh, unprocessed stories.
    ///
    /// No retries are attempted; failures surface as adapter errors.
    async fn fetch_top_posts(&self, subreddit: &str, limit: usize) -> DreadcastResult<Vec<Story>>;

    /// Source name (e.g., "reddit").
    fn source_name(&self) -> &'static str;
}

/// Text-to-speech narration of a story.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Produce an audio artifact for the story's text.
    ///
    /// # Errors
    ///
    /// Returns an adapter error on any vendor, network or decoding failure.
    async fn synthesize(&self, story: &Story) -> DreadcastResult<AudioArtifact>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Optional video rendering from a narration track.
#[async_trait]
pub trait VideoEncoder: Send + Sync {
    /// Whether the encoder can run on this host.
    async fn is_available(&self) -> bool;

    /// Render a video for the story using its narration audio.
    async fn encode(&self, story: &Story, audio: &AudioArtifact) -> DreadcastResult<VideoArtifact>;
}

/// Still image for one segment of a story video.
///
/// Implementations write an image in any format FFmpeg can read. The encoder
/// scales it to the frame size and falls back to a text frame when
/// illustration fails.
#[async_trait]
pub trait SegmentIllustrator: Send + Sync {
    /// Write an image for `segment` of `story` to `output`.
    ///
    /// # Errors
    ///
    /// Returns an adapter error when no image could be produced.
    async fn illustrate(
        &self,
        story: &Story,
        segment: &StorySegment,
        output: &Path,
    ) -> DreadcastResult<()>;

    /// Illustrator name (e.g., "gemini-image").
    fn illustrator_name(&self) -> &'static str;
}
