//! Narration command handler.

use dreadcast::{
    DreadcastConfig, DreadcastResult, FfmpegEncoder, FileSystemStoryStore, GeminiNarrator,
    VideoEncoder, VideoOutcome, narrate_next,
};
use tracing::instrument;

/// Narrate the next unprocessed story.
///
/// Video is rendered when `--video` is passed or `video.enabled` is set.
#[instrument(skip(config))]
pub async fn run_process(
    config: &DreadcastConfig,
    video: bool,
    voice: Option<String>,
) -> DreadcastResult<()> {
    let store = FileSystemStoryStore::new(&config.paths.stories_dir)?;

    let mut narrator = GeminiNarrator::new(config.narration.clone(), &config.paths.audio_dir)?;
    if let Some(voice) = voice {
        narrator = narrator.with_voice(voice);
    }

    let encoder = FfmpegEncoder::new(config.video.clone(), &config.paths.video_dir);
    let encoder: Option<&dyn VideoEncoder> = if video || config.video.enabled {
        Some(&encoder)
    } else {
        None
    };

    let Some(outcome) = narrate_next(&store, &narrator, encoder).await? else {
        println!("All stories have been processed.");
        return Ok(());
    };

    println!("Narrated: {} [{}]", outcome.story.title(), outcome.story.id());
    println!(
        "  audio:  {} ({:.1}s)",
        outcome.audio.path().display(),
        outcome.audio.duration_secs()
    );
    match &outcome.video {
        VideoOutcome::NotRequested => {}
        VideoOutcome::Unavailable => println!("  video:  skipped (FFmpeg not available)"),
        VideoOutcome::Rendered { artifact } => {
            println!("  video:  {}", artifact.path().display())
        }
        VideoOutcome::Failed { reason } => println!("  video:  failed ({})", reason),
    }
    Ok(())
}
