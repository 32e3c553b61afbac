//! Pipeline workflows: fetch into the store, narrate the next story.
//!
//! Every collaborator is passed in explicitly as a trait object or generic,
//! so the same functions drive the CLI and the tests.

use dreadcast_core::{Story, StoryId};
use dreadcast_error::DreadcastResult;
use dreadcast_interface::{
    AudioArtifact, Narrator, StorySource, StoryStore, VideoArtifact, VideoEncoder,
};
use dreadcast_storage::next_unprocessed;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Result of a fetch: which stories were new and which were already stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    /// Stories saved by this run
    pub saved: Vec<StoryId>,
    /// Stories skipped because the store already had them
    pub skipped: Vec<StoryId>,
}

impl FetchReport {
    /// Total posts returned by the source.
    pub fn fetched(&self) -> usize {
        self.saved.len() + self.skipped.len()
    }
}

/// Fetch the top posts of `subreddit` and save the ones not yet stored.
///
/// Existing records are left untouched, so a re-fetch never rewrites a
/// processed story.
///
/// # Errors
///
/// Returns the first source or store error; stories saved before the error
/// stay saved.
#[instrument(skip(source, store), fields(source = source.source_name()))]
pub async fn fetch_and_save<Src, St>(
    source: &Src,
    store: &St,
    subreddit: &str,
    limit: usize,
) -> DreadcastResult<FetchReport>
where
    Src: StorySource + ?Sized,
    St: StoryStore + ?Sized,
{
    let stories = source.fetch_top_posts(subreddit, limit).await?;

    let mut report = FetchReport::default();
    for story in stories {
        if store.contains(story.id()).await? {
            report.skipped.push(story.id().clone());
            continue;
        }
        store.save(&story).await?;
        report.saved.push(story.id().clone());
    }

    info!(
        saved = report.saved.len(),
        skipped = report.skipped.len(),
        "Fetch complete"
    );
    Ok(report)
}

/// What happened to the optional video step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VideoOutcome {
    /// No encoder was supplied
    NotRequested,
    /// The encoder cannot run on this host
    Unavailable,
    /// Video written
    Rendered {
        /// The encoded file
        artifact: VideoArtifact,
    },
    /// Encoding failed after narration succeeded
    Failed {
        /// Encoder error message
        reason: String,
    },
}

/// A story narrated and marked processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrationOutcome {
    /// The story as persisted, with `processed = true`
    pub story: Story,
    /// The narration audio
    pub audio: AudioArtifact,
    /// The video step
    pub video: VideoOutcome,
}

/// Narrate the next unprocessed story and mark it processed.
///
/// Returns `Ok(None)` when nothing is left to narrate. The story is marked
/// processed only after audio synthesis succeeds; a narrator error leaves it
/// unprocessed so the next run picks it up again. Video failures are logged
/// and reported in the outcome but do not block marking.
///
/// # Errors
///
/// Returns store errors and narrator errors.
#[instrument(skip_all, fields(narrator = narrator.provider_name(), video = video.is_some()))]
pub async fn narrate_next<St, N>(
    store: &St,
    narrator: &N,
    video: Option<&dyn VideoEncoder>,
) -> DreadcastResult<Option<NarrationOutcome>>
where
    St: StoryStore + ?Sized,
    N: Narrator + ?Sized,
{
    let Some(story) = next_unprocessed(store).await? else {
        info!("No unprocessed stories");
        return Ok(None);
    };

    info!(id = %story.id(), title = %story.title(), "Narrating story");

    let audio = match narrator.synthesize(&story).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!(id = %story.id(), error = %e, "Narration failed; story left unprocessed");
            return Err(e);
        }
    };

    let video = render_video(video, &story, &audio).await;
    let story = store.mark_processed(story.id()).await?;

    Ok(Some(NarrationOutcome {
        story,
        audio,
        video,
    }))
}

async fn render_video(
    encoder: Option<&dyn VideoEncoder>,
    story: &Story,
    audio: &AudioArtifact,
) -> VideoOutcome {
    let Some(encoder) = encoder else {
        return VideoOutcome::NotRequested;
    };

    if !encoder.is_available().await {
        warn!("Video encoder not available; skipping video");
        return VideoOutcome::Unavailable;
    }

    match encoder.encode(story, audio).await {
        Ok(artifact) => VideoOutcome::Rendered { artifact },
        Err(e) => {
            warn!(id = %story.id(), error = %e, "Video encoding failed");
            VideoOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
