//! Core data types for the Dreadcast pipeline.
//!
//! This crate provides the story record shared by the store, the selector and
//! both adapters.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod naming;
mod segment;
mod story;

pub use naming::{artifact_stem, sanitize_title};
pub use segment::{SegmentKind, split_segments};
pub use story::{Story, StoryBuilder, StoryBuilderError, StoryDefect, StoryId};
