//! Reddit listing JSON model and conversion to stories.

use chrono::{DateTime, Duration, Utc};
use dreadcast_core::{Story, StoryBuilder, StoryId};
use dreadcast_error::{AdapterError, AdapterErrorKind, DreadcastResult};
use serde::Deserialize;

/// Top-level listing response (`{"kind": "Listing", "data": {...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    /// Listing payload
    pub data: ListingData,
}

/// Listing payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    /// Posts in listing order
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

/// Listing entry wrapper (`{"kind": "t3", "data": {...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild {
    /// The post itself
    pub data: Post,
}

/// The subset of a Reddit post the pipeline uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Base36 post id
    pub id: String,
    /// Post title
    #[serde(default)]
    pub title: String,
    /// Body text of a self post
    #[serde(default)]
    pub selftext: String,
    /// Author name
    #[serde(default)]
    pub author: Option<String>,
    /// Net score
    #[serde(default)]
    pub score: i64,
    /// Upvote ratio
    #[serde(default)]
    pub upvote_ratio: Option<f64>,
    /// Publication time in Unix seconds
    #[serde(default)]
    pub created_utc: Option<f64>,
    /// Site-relative permalink
    #[serde(default)]
    pub permalink: Option<String>,
    /// Comment count
    #[serde(default)]
    pub num_comments: Option<u64>,
}

impl Post {
    /// Whether this post carries narratable text.
    ///
    /// Link posts, removed/deleted posts and bodies shorter than
    /// `min_body_chars` characters are rejected.
    pub fn has_story_text(&self, min_body_chars: usize) -> bool {
        let body = self.selftext.trim();
        if body.is_empty() || body == "[removed]" || body == "[deleted]" {
            return false;
        }
        body.chars().count() >= min_body_chars.max(1)
    }
}

/// Parse a listing body into unprocessed stories, best score first.
///
/// Each story's `created_at` is `fetched_at` plus its rank in milliseconds,
/// so creation order within one fetch follows the score ranking.
///
/// # Errors
///
/// Returns an adapter error if the body is not a listing.
pub fn parse_listing(
    body: &str,
    fetched_at: DateTime<Utc>,
    min_body_chars: usize,
) -> DreadcastResult<Vec<Story>> {
    let listing: Listing = serde_json::from_str(body).map_err(|e| {
        AdapterError::new(AdapterErrorKind::InvalidResponse(format!(
            "Failed to parse Reddit listing: {}",
            e
        )))
    })?;

    let total = listing.data.children.len();
    let mut posts: Vec<Post> = listing
        .data
        .children
        .into_iter()
        .map(|child| child.data)
        .filter(|post| post.has_story_text(min_body_chars))
        .filter(|post| {
            let safe = StoryId::new(post.id.as_str()).is_storage_safe();
            if !safe {
                tracing::warn!(id = %post.id, "Skipping post with unusable id");
            }
            safe
        })
        .collect();

    posts.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(total, kept = posts.len(), "Filtered Reddit listing");

    let mut stories = Vec::with_capacity(posts.len());
    for (rank, post) in posts.into_iter().enumerate() {
        stories.push(to_story(post, fetched_at + Duration::milliseconds(rank as i64))?);
    }
    Ok(stories)
}

fn to_story(post: Post, created_at: DateTime<Utc>) -> DreadcastResult<Story> {
    let posted_at = post
        .created_utc
        .and_then(|secs| DateTime::from_timestamp(secs as i64, 0));
    let permalink = post
        .permalink
        .map(|path| format!("https://reddit.com{}", path));
    let title = if post.title.trim().is_empty() {
        "No Title".to_string()
    } else {
        post.title
    };

    StoryBuilder::default()
        .id(post.id)
        .title(title)
        .body(post.selftext)
        .score(post.score)
        .created_at(created_at)
        .author(post.author)
        .permalink(permalink)
        .num_comments(post.num_comments)
        .upvote_ratio(post.upvote_ratio)
        .posted_at(posted_at)
        .build()
        .map_err(|e| {
            AdapterError::new(AdapterErrorKind::InvalidResponse(format!(
                "Incomplete post: {}",
                e
            )))
            .into()
        })
}
