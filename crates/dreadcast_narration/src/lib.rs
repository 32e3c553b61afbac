//! Narration adapters for Dreadcast.
//!
//! This crate turns a story into artifacts on disk:
//! - [`GeminiNarrator`] - Gemini text-to-speech over the REST API, written as WAV
//! - [`FfmpegEncoder`] - optional MP4 slideshow of the story's segments over
//!   the narration, rendered with FFmpeg
//!
//! Neither adapter retries. When FFmpeg is missing the video step is skipped
//! by the caller; audio is unaffected.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod ffmpeg;
mod gemini;
mod slideshow;
mod wav;

pub use config::{API_KEY_ENV, NarrationConfig, VideoConfig};
pub use ffmpeg::FfmpegEncoder;
pub use gemini::{
    GeminiNarrator, GenerateContentRequest, GenerateContentResponse, narration_text,
};
pub use slideshow::{concat_list, plan_segments, segment_durations, wrap_text};
pub use wav::{WavInfo, encode_wav};
