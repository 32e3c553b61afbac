//! Narration and video configuration.

use dreadcast_core::SegmentKind;
use serde::{Deserialize, Serialize};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Text-to-speech settings, the `[narration]` section of `dreadcast.toml`.
///
/// ```toml
/// [narration]
/// model = "gemini-2.5-flash-preview-tts"
/// voice = "Kore"
/// include_title = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// TTS model name
    pub model: String,
    /// Prebuilt voice name
    pub voice: String,
    /// API key; falls back to `GEMINI_API_KEY` when unset
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Sample rate assumed when the response does not state one
    pub sample_rate: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// API root, without trailing slash
    pub base_url: String,
    /// Read the title before the body
    pub include_title: bool,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-preview-tts".to_string(),
            voice: "Kore".to_string(),
            api_key: None,
            sample_rate: 24_000,
            timeout_secs: 300,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            include_title: true,
        }
    }
}

impl NarrationConfig {
    /// The configured API key, else `GEMINI_API_KEY`. Blank values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// [`resolve_api_key`](Self::resolve_api_key) with an explicit environment lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let present = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(present)
            .or_else(|| lookup(API_KEY_ENV).filter(present))
    }
}

/// Video rendering settings, the `[video]` section of `dreadcast.toml`.
///
/// The story body is split into segments and each is shown as a frame for a
/// share of the narration proportional to its length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Render a video after narration even without `--video`
    pub enabled: bool,
    /// FFmpeg executable name or path
    pub ffmpeg_path: String,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Background color in any FFmpeg color syntax
    pub background: String,
    /// Text color of segment frames
    pub text_color: String,
    /// Font size of segment frames in pixels
    pub font_size: u32,
    /// TrueType font for segment frames; fontconfig's default when unset
    pub font_file: Option<String>,
    /// How the body is split into frames
    pub segment_kind: SegmentKind,
    /// Shortest time any segment stays on screen
    pub min_segment_secs: f64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ffmpeg_path: "ffmpeg".to_string(),
            width: 1920,
            height: 1080,
            background: "0x141414".to_string(),
            text_color: "white".to_string(),
            font_size: 48,
            font_file: None,
            segment_kind: SegmentKind::Paragraph,
            min_segment_secs: 2.0,
        }
    }
}
