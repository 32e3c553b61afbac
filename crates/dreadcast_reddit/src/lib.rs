//! Reddit scraper adapter for Dreadcast.
//!
//! Fetches a subreddit's top listing from Reddit's public JSON endpoint (no
//! API credentials) and turns text posts into unprocessed [`Story`] records.
//!
//! # Example
//!
//! ```no_run
//! use dreadcast_reddit::{RedditClient, RedditConfig};
//! use dreadcast_interface::StorySource;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RedditClient::new(RedditConfig::default())?;
//! let stories = client.fetch_top_posts("scarystories", 25).await?;
//! for story in &stories {
//!     println!("{} ({})", story.title(), story.score());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`Story`]: dreadcast_core::Story

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod listing;

pub use client::{RedditClient, validate_limit, validate_subreddit};
pub use config::{RedditConfig, TimeWindow};
pub use listing::{parse_listing, Listing, ListingChild, ListingData, Post};
