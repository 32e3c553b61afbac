//! FFmpeg video rendering.
//!
//! A story video is a slideshow: the body is split into segments, each
//! segment becomes one still frame, and the frames are joined with the
//! concat demuxer under the narration track. A frame is an illustration when
//! a [`SegmentIllustrator`] is attached and succeeds, otherwise the segment
//! text drawn on the background color.
//!
//! FFmpeg is an external executable; when it cannot be run the encoder
//! reports itself unavailable instead of failing.

use crate::{VideoConfig, concat_list, plan_segments, wrap_text};
use async_trait::async_trait;
use dreadcast_core::Story;
use dreadcast_error::{AdapterError, AdapterErrorKind, DreadcastResult};
use dreadcast_interface::{
    AudioArtifact, SegmentIllustrator, StorySegment, VideoArtifact, VideoEncoder,
};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

const CONCAT_LIST: &str = "frames.txt";
const LINE_SPACING: u32 = 10;
const TEXT_MARGIN: u32 = 100;

fn encoder_error(message: String) -> AdapterError {
    AdapterError::new(AdapterErrorKind::Encoder(message))
}

fn to_args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|arg| arg.to_string()).collect()
}

/// Where a frame's picture comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FrameSource {
    /// Wrapped segment text in this file
    Text(String),
    /// Image written by the illustrator
    Image(String),
}

/// One frame to render, relative to the work directory.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrameJob {
    source: FrameSource,
    frame: String,
    duration_secs: f64,
}

/// Video encoder shelling out to `ffmpeg`.
#[derive(Clone)]
pub struct FfmpegEncoder {
    config: VideoConfig,
    video_dir: PathBuf,
    illustrator: Option<Arc<dyn SegmentIllustrator>>,
}

impl std::fmt::Debug for FfmpegEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegEncoder")
            .field("config", &self.config)
            .field("video_dir", &self.video_dir)
            .field(
                "illustrator",
                &self.illustrator.as_ref().map(|i| i.illustrator_name()),
            )
            .finish()
    }
}

impl FfmpegEncoder {
    /// Create an encoder writing `<video_dir>/<title>_<id>.mp4`.
    pub fn new(config: VideoConfig, video_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            video_dir: video_dir.into(),
            illustrator: None,
        }
    }

    /// Illustrate segments with `illustrator`, falling back to text frames.
    pub fn with_illustrator(mut self, illustrator: Arc<dyn SegmentIllustrator>) -> Self {
        self.illustrator = Some(illustrator);
        self
    }

    /// Directory videos are written to.
    pub fn video_dir(&self) -> &Path {
        &self.video_dir
    }

    /// Characters per line that fit the frame at the configured font size.
    fn chars_per_line(&self) -> usize {
        let usable = self.config.width.saturating_sub(TEXT_MARGIN) as f64;
        let glyph = self.config.font_size.max(1) as f64 * 0.55;
        ((usable / glyph) as usize).max(10)
    }

    /// Arguments drawing the text in `text_file` onto a single frame.
    pub fn text_frame_args(&self, text_file: &str, frame: &str) -> Vec<String> {
        let source = format!(
            "color=c={}:s={}x{}",
            self.config.background, self.config.width, self.config.height
        );
        let mut drawtext = format!(
            "drawtext=textfile={}:expansion=none:fontcolor={}:fontsize={}:line_spacing={}\
             :shadowcolor=black:shadowx=2:shadowy=2:x=(w-text_w)/2:y=(h-text_h)/2",
            text_file, self.config.text_color, self.config.font_size, LINE_SPACING
        );
        if let Some(font) = &self.config.font_file {
            drawtext.push_str(&format!(":fontfile='{}'", font.replace('\'', r"'\''")));
        }
        to_args(&[
            "-y",
            "-f",
            "lavfi",
            "-i",
            source.as_str(),
            "-vf",
            drawtext.as_str(),
            "-frames:v",
            "1",
            frame,
        ])
    }

    /// Arguments scaling an illustration onto a letterboxed frame.
    pub fn still_frame_args(&self, image: &str, frame: &str) -> Vec<String> {
        let (w, h) = (self.config.width, self.config.height);
        let filter = format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=black"
        );
        to_args(&["-y", "-i", image, "-vf", filter.as_str(), "-frames:v", "1", frame])
    }

    /// Arguments joining the frames in `concat_list` under `audio`.
    pub fn encode_args(&self, concat_list: &str, audio: &Path, output: &Path) -> Vec<String> {
        let audio = audio.display().to_string();
        let output = output.display().to_string();
        to_args(&[
            "-y",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
            concat_list,
            "-i",
            audio.as_str(),
            "-c:v",
            "libx264",
            "-preset",
            "medium",
            "-crf",
            "23",
            "-tune",
            "stillimage",
            "-c:a",
            "aac",
            "-b:a",
            "128k",
            "-pix_fmt",
            "yuv420p",
            "-shortest",
            output.as_str(),
        ])
    }

    fn frame_args(&self, job: &FrameJob) -> Vec<String> {
        match &job.source {
            FrameSource::Text(text_file) => self.text_frame_args(text_file, &job.frame),
            FrameSource::Image(image) => self.still_frame_args(image, &job.frame),
        }
    }

    /// Write each segment's inputs into `work_dir` and decide its frame source.
    pub(crate) async fn prepare_frames(
        &self,
        story: &Story,
        segments: &[StorySegment],
        work_dir: &Path,
    ) -> DreadcastResult<Vec<FrameJob>> {
        let mut jobs = Vec::with_capacity(segments.len());

        for segment in segments {
            let index = *segment.index();
            let mut source = None;

            if let Some(illustrator) = &self.illustrator {
                let image = format!("illustration_{:04}.png", index);
                match illustrator
                    .illustrate(story, segment, &work_dir.join(&image))
                    .await
                {
                    Ok(()) => source = Some(FrameSource::Image(image)),
                    Err(e) => warn!(
                        segment = index,
                        illustrator = illustrator.illustrator_name(),
                        error = %e,
                        "Illustration failed; using text frame"
                    ),
                }
            }

            let source = match source {
                Some(source) => source,
                None => {
                    let text_file = format!("segment_{:04}.txt", index);
                    let path = work_dir.join(&text_file);
                    tokio::fs::write(&path, wrap_text(segment.text(), self.chars_per_line()))
                        .await
                        .map_err(|e| {
                            encoder_error(format!("Failed to write {}: {}", path.display(), e))
                        })?;
                    FrameSource::Text(text_file)
                }
            };

            jobs.push(FrameJob {
                source,
                frame: format!("frame_{:04}.png", index),
                duration_secs: *segment.duration_secs(),
            });
        }

        Ok(jobs)
    }

    /// Run ffmpeg in `work_dir`, turning a non-zero exit into an error with
    /// the tail of its stderr.
    async fn run_ffmpeg(&self, args: &[String], work_dir: &Path) -> DreadcastResult<()> {
        debug!(?args, "Running ffmpeg");

        let result = Command::new(&self.config.ffmpeg_path)
            .args(args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                encoder_error(format!("Failed to run {}: {}", self.config.ffmpeg_path, e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(5)..].join("\n");
            warn!(status = ?result.status, "ffmpeg failed");
            return Err(encoder_error(format!("ffmpeg exited with {}: {}", result.status, tail)).into());
        }

        Ok(())
    }
}

#[async_trait]
impl VideoEncoder for FfmpegEncoder {
    #[instrument(skip(self), fields(ffmpeg = %self.config.ffmpeg_path))]
    async fn is_available(&self) -> bool {
        let status = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                debug!(?status, "ffmpeg -version exited unsuccessfully");
                false
            }
            Err(e) => {
                debug!(error = %e, "ffmpeg could not be started");
                false
            }
        }
    }

    #[instrument(skip(self, story, audio), fields(id = %story.id(), audio = %audio.path().display()))]
    async fn encode(&self, story: &Story, audio: &AudioArtifact) -> DreadcastResult<VideoArtifact> {
        tokio::fs::create_dir_all(&self.video_dir).await.map_err(|e| {
            encoder_error(format!(
                "Failed to create {}: {}",
                self.video_dir.display(),
                e
            ))
        })?;

        let output = self
            .video_dir
            .join(format!("{}.mp4", story.artifact_stem()));
        // ffmpeg runs inside the work directory
        let absolute = |path: &Path| {
            std::path::absolute(path)
                .map_err(|e| encoder_error(format!("Failed to resolve {}: {}", path.display(), e)))
        };
        let audio_path = absolute(audio.path())?;
        let output_path = absolute(&output)?;

        let work_dir = tempfile::Builder::new()
            .prefix(".frames-")
            .tempdir_in(&self.video_dir)
            .map_err(|e| encoder_error(format!("Failed to create frame directory: {}", e)))?;

        let segments = plan_segments(
            story,
            self.config.segment_kind,
            *audio.duration_secs(),
            self.config.min_segment_secs,
        );
        info!(
            segments = segments.len(),
            kind = %self.config.segment_kind,
            "Planned video segments"
        );

        let jobs = self.prepare_frames(story, &segments, work_dir.path()).await?;
        for job in &jobs {
            self.run_ffmpeg(&self.frame_args(job), work_dir.path()).await?;
        }

        let frames: Vec<(String, f64)> = jobs
            .iter()
            .map(|job| (job.frame.clone(), job.duration_secs))
            .collect();
        let list_path = work_dir.path().join(CONCAT_LIST);
        tokio::fs::write(&list_path, concat_list(&frames))
            .await
            .map_err(|e| encoder_error(format!("Failed to write {}: {}", list_path.display(), e)))?;

        self.run_ffmpeg(
            &self.encode_args(CONCAT_LIST, &audio_path, &output_path),
            work_dir.path(),
        )
        .await?;

        info!(path = %output.display(), frames = jobs.len(), "Rendered video");
        Ok(VideoArtifact::new(output))
    }
}
