//! Tests for Reddit listing parsing and request validation.

use chrono::{Duration, TimeZone, Utc};
use dreadcast_reddit::{
    RedditClient, RedditConfig, TimeWindow, parse_listing, validate_limit, validate_subreddit,
};

const LONG_BODY_A: &str = "I moved into the house on Alder Street in October, and the first night I heard it.";
const LONG_BODY_B: &str = "My grandmother always told us never to answer the door after midnight, no matter who knocked.";

fn listing_json() -> String {
    serde_json::json!({
        "kind": "Listing",
        "data": {
            "after": null,
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "id": "low1",
                        "title": "The house on Alder Street",
                        "selftext": LONG_BODY_A,
                        "author": "night_owl",
                        "score": 120,
                        "upvote_ratio": 0.97,
                        "created_utc": 1759320000.0,
                        "permalink": "/r/scarystories/comments/low1/the_house/",
                        "num_comments": 14
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "id": "rmvd",
                        "title": "Removed",
                        "selftext": "[removed]",
                        "score": 900
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "id": "link",
                        "title": "A link post",
                        "selftext": "",
                        "score": 800
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "id": "short",
                        "title": "Too short",
                        "selftext": "boo",
                        "score": 700
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "id": "high2",
                        "title": "Never answer after midnight",
                        "selftext": LONG_BODY_B,
                        "author": "gran_knows",
                        "score": 455
                    }
                }
            ]
        }
    })
    .to_string()
}

#[test]
fn test_parse_listing_filters_and_ranks() {
    let fetched_at = Utc.with_ymd_and_hms(2025, 10, 2, 9, 0, 0).unwrap();
    let stories = parse_listing(&listing_json(), fetched_at, 50).unwrap();

    let ids: Vec<&str> = stories.iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec!["high2", "low1"]);
    assert!(stories.iter().all(|s| !s.processed()));
}

#[test]
fn test_parse_listing_creation_order_follows_rank() {
    let fetched_at = Utc.with_ymd_and_hms(2025, 10, 2, 9, 0, 0).unwrap();
    let stories = parse_listing(&listing_json(), fetched_at, 50).unwrap();

    assert_eq!(*stories[0].created_at(), fetched_at);
    assert_eq!(
        *stories[1].created_at(),
        fetched_at + Duration::milliseconds(1)
    );
}

#[test]
fn test_parse_listing_populates_metadata() {
    let stories = parse_listing(&listing_json(), Utc::now(), 50).unwrap();
    let low = stories.iter().find(|s| s.id().as_str() == "low1").unwrap();

    assert_eq!(low.title(), "The house on Alder Street");
    assert_eq!(low.body(), LONG_BODY_A);
    assert_eq!(*low.score(), 120);
    assert_eq!(low.author().as_deref(), Some("night_owl"));
    assert_eq!(
        low.permalink().as_deref(),
        Some("https://reddit.com/r/scarystories/comments/low1/the_house/")
    );
    assert_eq!(*low.num_comments(), Some(14));
    assert_eq!(
        *low.posted_at(),
        Some(Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap())
    );
}

#[test]
fn test_parse_listing_empty_children() {
    let body = r#"{"kind":"Listing","data":{"children":[]}}"#;
    assert!(parse_listing(body, Utc::now(), 50).unwrap().is_empty());
}

#[test]
fn test_parse_listing_rejects_garbage() {
    assert!(parse_listing("<html>blocked</html>", Utc::now(), 50).is_err());
}

#[test]
fn test_validate_subreddit() {
    assert_eq!(validate_subreddit("scarystories").unwrap(), "scarystories");
    assert_eq!(validate_subreddit("r/One_Paragraph").unwrap(), "One_Paragraph");
    assert!(validate_subreddit("").is_err());
    assert!(validate_subreddit("../admin").is_err());
}

#[test]
fn test_validate_limit() {
    assert!(validate_limit(0).is_err());
    assert_eq!(validate_limit(1).unwrap(), 1);
    assert_eq!(validate_limit(100).unwrap(), 100);
    assert!(validate_limit(101).is_err());
}

#[test]
fn test_listing_url() {
    let config = RedditConfig {
        base_url: "https://www.reddit.com/".to_string(),
        window: TimeWindow::Day,
        ..RedditConfig::default()
    };
    let client = RedditClient::new(config).unwrap();
    assert_eq!(
        client.listing_url("nosleep"),
        "https://www.reddit.com/r/nosleep/top.json"
    );
}
