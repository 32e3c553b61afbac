//! Selection of the next story to narrate.

use dreadcast_core::Story;
use dreadcast_error::DreadcastResult;
use dreadcast_interface::StoryStore;
use serde::{Deserialize, Serialize};

/// Pick the first unprocessed story by ascending creation time, ties broken
/// by identifier.
///
/// Does not assume `stories` is sorted.
pub fn select_next(stories: &[Story]) -> Option<&Story> {
    stories.iter().filter(|s| !s.processed()).min_by(|a, b| {
        a.created_at()
            .cmp(b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    })
}

/// Scan the store for the next unprocessed story.
///
/// Returns `None` when every stored record is processed (or the store is
/// empty). Repeated calls without an intervening mutation return the same
/// story.
///
/// # Errors
///
/// Propagates any error from [`StoryStore::load_all`].
#[tracing::instrument(skip(store))]
pub async fn next_unprocessed<S>(store: &S) -> DreadcastResult<Option<Story>>
where
    S: StoryStore + ?Sized,
{
    let stories = store.load_all().await?;
    let next = select_next(&stories).cloned();

    match &next {
        Some(story) => tracing::debug!(id = %story.id(), "Selected next unprocessed story"),
        None => tracing::debug!(total = stories.len(), "No unprocessed stories"),
    }

    Ok(next)
}

/// Processed/unprocessed counts across a set of stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessingStatus {
    /// Stories with narration completed
    pub processed: usize,
    /// Stories still waiting for narration
    pub unprocessed: usize,
    /// All stories
    pub total: usize,
}

impl ProcessingStatus {
    /// Percentage of stories processed, `0.0` for an empty set.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64 * 100.0
        }
    }

    /// The counts together with the completion rate, for reporting.
    pub fn summary(&self) -> StatusSummary {
        StatusSummary {
            counts: *self,
            completion_rate: self.completion_rate(),
        }
    }
}

/// [`ProcessingStatus`] plus its completion rate, serialized flat.
///
/// ```json
/// {"processed": 2, "unprocessed": 2, "total": 4, "completion_rate": 50.0}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSummary {
    /// Raw counts
    #[serde(flatten)]
    pub counts: ProcessingStatus,
    /// Percentage of stories processed
    pub completion_rate: f64,
}

/// Count processed and unprocessed stories.
pub fn processing_status(stories: &[Story]) -> ProcessingStatus {
    let processed = stories.iter().filter(|s| s.processed()).count();
    ProcessingStatus {
        processed,
        unprocessed: stories.len() - processed,
        total: stories.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use dreadcast_core::StoryBuilder;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, minute, 0).unwrap()
    }

    fn story(id: &str, created_at: DateTime<Utc>, processed: bool) -> Story {
        let mut s = StoryBuilder::default()
            .id(id)
            .title(format!("Story {}", id))
            .body("Something was in the hallway.")
            .score(1)
            .created_at(created_at)
            .build()
            .unwrap();
        if processed {
            s.mark_processed(at(59));
        }
        s
    }

    #[test]
    fn test_select_next_empty() {
        assert!(select_next(&[]).is_none());
    }

    #[test]
    fn test_select_next_prefers_earliest_creation() {
        let stories = vec![story("b", at(2), false), story("a", at(1), false)];
        assert_eq!(select_next(&stories).unwrap().id().as_str(), "a");
    }

    #[test]
    fn test_select_next_breaks_ties_by_id() {
        let stories = vec![story("zz", at(1), false), story("aa", at(1), false)];
        assert_eq!(select_next(&stories).unwrap().id().as_str(), "aa");
    }

    #[test]
    fn test_select_next_skips_processed() {
        let stories = vec![story("a", at(1), true), story("b", at(2), false)];
        assert_eq!(select_next(&stories).unwrap().id().as_str(), "b");
    }

    #[test]
    fn test_select_next_none_when_all_processed() {
        let stories = vec![story("a", at(1), true), story("b", at(2), true)];
        assert!(select_next(&stories).is_none());
    }

    #[test]
    fn test_processing_status_counts() {
        let stories = vec![
            story("a", at(1), true),
            story("b", at(2), false),
            story("c", at(3), false),
            story("d", at(4), true),
        ];
        let status = processing_status(&stories);
        assert_eq!(status.processed, 2);
        assert_eq!(status.unprocessed, 2);
        assert_eq!(status.total, 4);
        assert!((status.completion_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_serializes_counts_and_rate() {
        let stories = vec![
            story("a", at(1), true),
            story("b", at(2), false),
            story("c", at(3), false),
            story("d", at(4), false),
        ];
        let json = serde_json::to_value(processing_status(&stories).summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "processed": 1,
                "unprocessed": 3,
                "total": 4,
                "completion_rate": 25.0,
            })
        );
    }

    #[test]
    fn test_completion_rate_empty() {
        assert_eq!(processing_status(&[]).completion_rate(), 0.0);
    }
}
