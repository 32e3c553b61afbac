//! System self-check behind `dreadcast check`.

use crate::DreadcastConfig;
use dreadcast_interface::{StoryStore, VideoEncoder};
use dreadcast_storage::FileSystemStoryStore;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Severity of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check passed
    #[display("ok")]
    Ok,
    /// Degraded but usable
    #[display("warn")]
    Warn,
    /// Blocks the pipeline
    #[display("fail")]
    Fail,
}

/// One line of the self-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    /// What was checked
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
    /// Human-readable detail
    pub detail: String,
}

impl CheckItem {
    fn new(name: impl Into<String>, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            detail: detail.into(),
        }
    }
}

/// Every check item in the order run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Individual results
    pub items: Vec<CheckItem>,
}

impl CheckReport {
    /// True unless some check failed. Warnings pass.
    pub fn passed(&self) -> bool {
        self.items.iter().all(|item| item.status != CheckStatus::Fail)
    }

    fn push(&mut self, item: CheckItem) {
        debug!(name = %item.name, status = %item.status, detail = %item.detail, "Check");
        self.items.push(item);
    }
}

/// Check directories, the story store, the API key and the video encoder.
///
/// A missing FFmpeg is a warning; unwritable directories, an unreadable
/// store and a missing API key are failures.
#[instrument(skip_all)]
pub async fn self_check(config: &DreadcastConfig, encoder: &dyn VideoEncoder) -> CheckReport {
    let mut report = CheckReport::default();

    for (name, dir) in [
        ("stories_dir", &config.paths.stories_dir),
        ("audio_dir", &config.paths.audio_dir),
        ("video_dir", &config.paths.video_dir),
    ] {
        report.push(check_writable(name, dir).await);
    }

    report.push(match FileSystemStoryStore::new(&config.paths.stories_dir) {
        Ok(store) => match store.load_all().await {
            Ok(stories) => CheckItem::new(
                "story_store",
                CheckStatus::Ok,
                format!("{} stories readable", stories.len()),
            ),
            Err(e) => CheckItem::new("story_store", CheckStatus::Fail, e.to_string()),
        },
        Err(e) => CheckItem::new("story_store", CheckStatus::Fail, e.to_string()),
    });

    report.push(if config.narration.resolve_api_key().is_some() {
        CheckItem::new("api_key", CheckStatus::Ok, "Gemini API key configured")
    } else {
        CheckItem::new(
            "api_key",
            CheckStatus::Fail,
            "set GEMINI_API_KEY or narration.api_key",
        )
    });

    report.push(if encoder.is_available().await {
        CheckItem::new("ffmpeg", CheckStatus::Ok, config.video.ffmpeg_path.clone())
    } else {
        CheckItem::new(
            "ffmpeg",
            CheckStatus::Warn,
            format!(
                "{} not runnable; video rendering will be skipped",
                config.video.ffmpeg_path
            ),
        )
    });

    report
}

async fn check_writable(name: &str, dir: &Path) -> CheckItem {
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        return CheckItem::new(
            name,
            CheckStatus::Fail,
            format!("cannot create {}: {}", dir.display(), e),
        );
    }

    let marker = dir.join(".dreadcast-write-test");
    match tokio::fs::write(&marker, b"ok").await {
        Ok(()) => {
            let _ = tokio::fs::remove_file(&marker).await;
            CheckItem::new(name, CheckStatus::Ok, dir.display().to_string())
        }
        Err(e) => CheckItem::new(
            name,
            CheckStatus::Fail,
            format!("cannot write {}: {}", dir.display(), e),
        ),
    }
}
