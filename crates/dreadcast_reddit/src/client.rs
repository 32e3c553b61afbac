//! HTTP client for Reddit's public top listing.

use crate::{RedditConfig, parse_listing};
use async_trait::async_trait;
use chrono::Utc;
use dreadcast_core::Story;
use dreadcast_error::{AdapterError, AdapterErrorKind, DreadcastResult};
use dreadcast_interface::StorySource;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Largest `limit` Reddit honours for a listing request.
const MAX_LIMIT: usize = 100;

/// Check a subreddit name before it is put into a URL.
///
/// Accepts an optional leading `r/` and returns the bare name.
///
/// # Examples
///
/// ```
/// use dreadcast_reddit::validate_subreddit;
///
/// assert_eq!(validate_subreddit("r/nosleep").unwrap(), "nosleep");
/// assert!(validate_subreddit("no sleep").is_err());
/// ```
pub fn validate_subreddit(subreddit: &str) -> DreadcastResult<&str> {
    let name = subreddit.trim().trim_start_matches("r/");
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AdapterError::new(AdapterErrorKind::InvalidRequest(format!(
            "Invalid subreddit name: {:?}",
            subreddit
        )))
        .into());
    }
    Ok(name)
}

/// Check a listing size (1..=100).
pub fn validate_limit(limit: usize) -> DreadcastResult<usize> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AdapterError::new(AdapterErrorKind::InvalidRequest(format!(
            "Limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )))
        .into());
    }
    Ok(limit)
}

/// Reddit scraper using the unauthenticated `top.json` listing.
#[derive(Debug, Clone)]
pub struct RedditClient {
    client: Client,
    config: RedditConfig,
}

impl RedditClient {
    /// Creates a new Reddit client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn new(config: RedditConfig) -> DreadcastResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AdapterError::new(AdapterErrorKind::InvalidRequest(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self { client, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &RedditConfig {
        &self.config
    }

    /// Listing URL for a subreddit.
    pub fn listing_url(&self, subreddit: &str) -> String {
        format!(
            "{}/r/{}/top.json",
            self.config.base_url.trim_end_matches('/'),
            subreddit
        )
    }
}

#[async_trait]
impl StorySource for RedditClient {
    #[instrument(skip(self), fields(window = %self.config.window))]
    async fn fetch_top_posts(&self, subreddit: &str, limit: usize) -> DreadcastResult<Vec<Story>> {
        let subreddit = validate_subreddit(subreddit)?;
        let limit = validate_limit(limit)?;
        let url = self.listing_url(subreddit);

        debug!(url = %url, "Requesting Reddit listing");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("t", self.config.window.to_string()),
                ("limit", limit.to_string()),
                ("raw_json", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AdapterError::new(AdapterErrorKind::Network(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdapterError::new(AdapterErrorKind::Http {
                status_code: status,
                message: error_text.chars().take(200).collect(),
            })
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::new(AdapterErrorKind::Network(e.to_string())))?;

        let stories = parse_listing(&body, Utc::now(), self.config.min_body_chars)?;

        info!(
            subreddit,
            count = stories.len(),
            "Fetched stories from Reddit"
        );
        Ok(stories)
    }

    fn source_name(&self) -> &'static str {
        "reddit"
    }
}
