//! Artifact and segment types exchanged with the narration adapters.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A narration audio file written to disk.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AudioArtifact {
    /// Location of the WAV file.
    path: PathBuf,
    /// Playback length in seconds.
    duration_secs: f64,
    /// Sample rate in Hz.
    sample_rate: u32,
    /// File size in bytes.
    size_bytes: u64,
}

/// A narration video file written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct VideoArtifact {
    /// Location of the MP4 file.
    path: PathBuf,
}

impl VideoArtifact {
    /// Wrap the path of an encoded video.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// One on-screen section of a story video.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct StorySegment {
    /// Position in the video, starting at 0.
    index: usize,
    /// Text shown or illustrated.
    text: String,
    /// How long the segment stays on screen.
    duration_secs: f64,
}

impl StorySegment {
    /// Create a segment.
    pub fn new(index: usize, text: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            index,
            text: text.into(),
            duration_secs,
        }
    }
}
