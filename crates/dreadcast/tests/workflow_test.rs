//! Tests for the fetch and narration workflows with mock adapters.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dreadcast::{
    AdapterError, AdapterErrorKind, AudioArtifact, AudioArtifactBuilder, CheckStatus,
    DreadcastConfig, DreadcastResult, FileSystemStoryStore, InMemoryStoryStore, Narrator, Story,
    StoryBuilder, StoryId, StorySource, StoryStore, VideoArtifact, VideoEncoder, VideoOutcome,
    fetch_and_save, narrate_next, next_unprocessed, self_check,
};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
}

fn story(id: &str, created_at: DateTime<Utc>) -> Story {
    StoryBuilder::default()
        .id(id)
        .title(format!("Story {}", id))
        .body(format!("The body of story {} is long enough to narrate.", id))
        .score(10)
        .created_at(created_at)
        .build()
        .expect("Valid story")
}

/// Mock source returning a fixed listing.
struct MockSource {
    stories: Vec<Story>,
    fail: bool,
}

impl MockSource {
    fn new(stories: Vec<Story>) -> Self {
        Self {
            stories,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            stories: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl StorySource for MockSource {
    async fn fetch_top_posts(&self, _subreddit: &str, limit: usize) -> DreadcastResult<Vec<Story>> {
        if self.fail {
            return Err(AdapterError::new(AdapterErrorKind::Http {
                status_code: 429,
                message: "Too Many Requests".to_string(),
            })
            .into());
        }
        Ok(self.stories.iter().take(limit).cloned().collect())
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

/// Mock narrator recording which stories it was asked to narrate.
struct MockNarrator {
    fail: bool,
    calls: Mutex<Vec<StoryId>>,
}

impl MockNarrator {
    fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    fn calls(&self) -> Vec<StoryId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Narrator for MockNarrator {
    async fn synthesize(&self, story: &Story) -> DreadcastResult<AudioArtifact> {
        self.calls.lock().unwrap().push(story.id().clone());
        if self.fail {
            return Err(AdapterError::new(AdapterErrorKind::Http {
                status_code: 503,
                message: "Mock TTS outage".to_string(),
            })
            .into());
        }
        Ok(AudioArtifactBuilder::default()
            .path(PathBuf::from(format!("audio/{}.wav", story.artifact_stem())))
            .duration_secs(12.5)
            .sample_rate(24_000u32)
            .size_bytes(600_044u64)
            .build()
            .expect("Valid artifact"))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Mock encoder with configurable availability and failure.
struct MockEncoder {
    available: bool,
    fail: bool,
}

#[async_trait]
impl VideoEncoder for MockEncoder {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn encode(&self, story: &Story, _audio: &AudioArtifact) -> DreadcastResult<VideoArtifact> {
        if self.fail {
            return Err(
                AdapterError::new(AdapterErrorKind::Encoder("mock ffmpeg crash".to_string()))
                    .into(),
            );
        }
        Ok(VideoArtifact::new(format!(
            "videos/{}.mp4",
            story.artifact_stem()
        )))
    }
}

#[tokio::test]
async fn test_fetch_saves_new_and_skips_existing() {
    let store = InMemoryStoryStore::new();
    store.save(&story("a", t0())).await.unwrap();
    store.mark_processed(&StoryId::new("a")).await.unwrap();

    let source = MockSource::new(vec![
        story("a", t0() + Duration::hours(1)),
        story("b", t0() + Duration::hours(1)),
        story("c", t0() + Duration::hours(1)),
    ]);
    let report = fetch_and_save(&source, &store, "scarystories", 25)
        .await
        .unwrap();

    assert_eq!(report.saved, vec![StoryId::new("b"), StoryId::new("c")]);
    assert_eq!(report.skipped, vec![StoryId::new("a")]);
    assert_eq!(report.fetched(), 3);

    // Existing record untouched
    let a = store.get(&StoryId::new("a")).await.unwrap();
    assert!(a.processed());
    assert_eq!(*a.created_at(), t0());
}

#[tokio::test]
async fn test_fetch_source_failure_propagates() {
    let store = InMemoryStoryStore::new();
    let result = fetch_and_save(&MockSource::failing(), &store, "scarystories", 25).await;

    assert!(result.is_err());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_narrate_next_marks_processed() {
    let store = InMemoryStoryStore::new();
    store.save(&story("a", t0())).await.unwrap();
    store
        .save(&story("b", t0() + Duration::seconds(1)))
        .await
        .unwrap();
    let narrator = MockNarrator::new();

    let outcome = narrate_next(&store, &narrator, None).await.unwrap().unwrap();

    assert_eq!(outcome.story.id().as_str(), "a");
    assert!(outcome.story.processed());
    assert_eq!(outcome.video, VideoOutcome::NotRequested);
    assert_eq!(
        outcome.audio.path(),
        &PathBuf::from("audio/Story_a_a.wav")
    );
    assert!(store.get(&StoryId::new("a")).await.unwrap().processed());
    assert_eq!(
        next_unprocessed(&store).await.unwrap().unwrap().id().as_str(),
        "b"
    );
}

#[tokio::test]
async fn test_narrator_failure_leaves_story_unprocessed() {
    let store = InMemoryStoryStore::new();
    store.save(&story("a", t0())).await.unwrap();
    let narrator = MockNarrator::new().with_failure();

    let result = narrate_next(&store, &narrator, None).await;

    assert!(result.is_err());
    assert_eq!(narrator.calls(), vec![StoryId::new("a")]);
    assert!(!store.get(&StoryId::new("a")).await.unwrap().processed());
    assert_eq!(
        next_unprocessed(&store).await.unwrap().unwrap().id().as_str(),
        "a"
    );
}

#[tokio::test]
async fn test_narrate_next_with_nothing_to_do() {
    let store = InMemoryStoryStore::new();
    let narrator = MockNarrator::new();
    assert!(narrate_next(&store, &narrator, None).await.unwrap().is_none());

    store.save(&story("a", t0())).await.unwrap();
    store.mark_processed(&StoryId::new("a")).await.unwrap();
    assert!(narrate_next(&store, &narrator, None).await.unwrap().is_none());
    assert!(narrator.calls().is_empty());
}

#[tokio::test]
async fn test_video_rendered_when_available() {
    let store = InMemoryStoryStore::new();
    store.save(&story("a", t0())).await.unwrap();
    let encoder = MockEncoder {
        available: true,
        fail: false,
    };

    let outcome = narrate_next(&store, &MockNarrator::new(), Some(&encoder))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        outcome.video,
        VideoOutcome::Rendered {
            artifact: VideoArtifact::new("videos/Story_a_a.mp4")
        }
    );
}

#[tokio::test]
async fn test_video_unavailable_still_marks_processed() {
    let store = InMemoryStoryStore::new();
    store.save(&story("a", t0())).await.unwrap();
    let encoder = MockEncoder {
        available: false,
        fail: false,
    };

    let outcome = narrate_next(&store, &MockNarrator::new(), Some(&encoder))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome.video, VideoOutcome::Unavailable);
    assert!(store.get(&StoryId::new("a")).await.unwrap().processed());
}

#[tokio::test]
async fn test_video_failure_still_marks_processed() {
    let store = InMemoryStoryStore::new();
    store.save(&story("a", t0())).await.unwrap();
    let encoder = MockEncoder {
        available: true,
        fail: true,
    };

    let outcome = narrate_next(&store, &MockNarrator::new(), Some(&encoder))
        .await
        .unwrap()
        .unwrap();

    assert!(matches!(outcome.video, VideoOutcome::Failed { .. }));
    assert!(store.get(&StoryId::new("a")).await.unwrap().processed());
}

#[tokio::test]
async fn test_full_pipeline_on_filesystem() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStoryStore::new(temp_dir.path()).unwrap();
    let source = MockSource::new(vec![
        story("first", t0()),
        story("second", t0() + Duration::milliseconds(1)),
    ]);
    let narrator = MockNarrator::new();

    fetch_and_save(&source, &store, "scarystories", 25)
        .await
        .unwrap();

    let one = narrate_next(&store, &narrator, None).await.unwrap().unwrap();
    let two = narrate_next(&store, &narrator, None).await.unwrap().unwrap();
    assert_eq!(one.story.id().as_str(), "first");
    assert_eq!(two.story.id().as_str(), "second");
    assert!(narrate_next(&store, &narrator, None).await.unwrap().is_none());

    // A re-fetch does not resurrect processed stories
    let report = fetch_and_save(&source, &store, "scarystories", 25)
        .await
        .unwrap();
    assert!(report.saved.is_empty());
    assert!(next_unprocessed(&store).await.unwrap().is_none());
}

#[tokio::test]
async fn test_self_check_warns_without_ffmpeg() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = DreadcastConfig::default();
    config.paths.stories_dir = temp_dir.path().join("stories");
    config.paths.audio_dir = temp_dir.path().join("audio");
    config.paths.video_dir = temp_dir.path().join("videos");
    config.narration.api_key = Some("test-key".to_string());
    let encoder = MockEncoder {
        available: false,
        fail: false,
    };

    let report = self_check(&config, &encoder).await;

    assert!(report.passed());
    let ffmpeg = report.items.iter().find(|i| i.name == "ffmpeg").unwrap();
    assert_eq!(ffmpeg.status, CheckStatus::Warn);
    assert!(config.paths.audio_dir.is_dir());
}

#[tokio::test]
async fn test_self_check_fails_on_malformed_store() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = DreadcastConfig::default();
    config.paths.stories_dir = temp_dir.path().join("stories");
    config.paths.audio_dir = temp_dir.path().join("audio");
    config.paths.video_dir = temp_dir.path().join("videos");
    config.narration.api_key = Some("test-key".to_string());
    std::fs::create_dir_all(&config.paths.stories_dir).unwrap();
    std::fs::write(config.paths.stories_dir.join("bad.json"), "{").unwrap();
    let encoder = MockEncoder {
        available: true,
        fail: false,
    };

    let report = self_check(&config, &encoder).await;

    assert!(!report.passed());
    let store = report
        .items
        .iter()
        .find(|i| i.name == "story_store")
        .unwrap();
    assert_eq!(store.status, CheckStatus::Fail);
}
