//! Scraper configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time window for Reddit's top listing (`t=` query parameter).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// Past hour
    #[display("hour")]
    Hour,
    /// Past day
    #[display("day")]
    Day,
    /// Past week
    #[default]
    #[display("week")]
    Week,
    /// Past month
    #[display("month")]
    Month,
    /// Past year
    #[display("year")]
    Year,
    /// All time
    #[display("all")]
    All,
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            _ => Err(format!(
                "Unknown time window: {} (expected hour, day, week, month, year or all)",
                s
            )),
        }
    }
}

/// Settings for the Reddit scraper, the `[reddit]` section of `dreadcast.toml`.
///
/// ```toml
/// [reddit]
/// subreddit = "scarystories"
/// limit = 25
/// window = "week"
/// min_body_chars = 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    /// Subreddit fetched when none is given on the command line
    pub subreddit: String,
    /// Number of posts requested
    pub limit: usize,
    /// Top listing time window
    pub window: TimeWindow,
    /// Posts with less body text than this (after trimming) are skipped
    pub min_body_chars: usize,
    /// User-Agent header; Reddit rejects generic agents
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Scheme and host of the listing endpoint
    pub base_url: String,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            subreddit: "scarystories".to_string(),
            limit: 25,
            window: TimeWindow::Week,
            min_body_chars: 50,
            user_agent: concat!("dreadcast/", env!("CARGO_PKG_VERSION"), " (story narration)")
                .to_string(),
            timeout_secs: 10,
            base_url: "https://www.reddit.com".to_string(),
        }
    }
}
