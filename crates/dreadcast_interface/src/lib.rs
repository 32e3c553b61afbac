//! Trait definitions for the Dreadcast pipeline.
//!
//! The store and every external collaborator sit behind a trait here, so the
//! workflow can be driven with real adapters in the binary and with in-memory
//! or mock implementations in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{Narrator, SegmentIllustrator, StorySource, StoryStore, VideoEncoder};
pub use types::{
    AudioArtifact, AudioArtifactBuilder, AudioArtifactBuilderError, StorySegment, VideoArtifact,
};
