//! In-memory story store for tests.
//!
//! Stores records in a HashMap protected by an RwLock. All data is lost when
//! the store is dropped.

use crate::validate_story;
use async_trait::async_trait;
use chrono::Utc;
use dreadcast_core::{Story, StoryId};
use dreadcast_error::{DreadcastResult, NotFoundError};
use dreadcast_interface::StoryStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`StoryStore`].
///
/// # Example
/// ```
/// use dreadcast_storage::{InMemoryStoryStore, next_unprocessed};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryStoryStore::new();
/// assert!(next_unprocessed(&store).await.unwrap().is_none());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryStore {
    stories: Arc<RwLock<HashMap<StoryId, Story>>>,
}

impl InMemoryStoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records (for testing).
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }
}

#[async_trait]
impl StoryStore for InMemoryStoryStore {
    async fn load_all(&self) -> DreadcastResult<Vec<Story>> {
        let mut stories: Vec<Story> = self.stories.read().await.values().cloned().collect();
        stories.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(stories)
    }

    async fn get(&self, id: &StoryId) -> DreadcastResult<Story> {
        self.stories
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| NotFoundError::new(id.as_str()).into())
    }

    async fn contains(&self, id: &StoryId) -> DreadcastResult<bool> {
        Ok(self.stories.read().await.contains_key(id))
    }

    async fn save(&self, story: &Story) -> DreadcastResult<()> {
        validate_story(story)?;

        let mut stories = self.stories.write().await;
        let mut record = story.clone();
        if let Some(existing) = stories.get(story.id()) {
            record.inherit_processed(existing);
        }
        stories.insert(record.id().clone(), record);
        Ok(())
    }

    async fn mark_processed(&self, id: &StoryId) -> DreadcastResult<Story> {
        let mut stories = self.stories.write().await;
        let story = stories
            .get_mut(id)
            .ok_or_else(|| NotFoundError::new(id.as_str()))?;
        story.mark_processed(Utc::now());
        Ok(story.clone())
    }
}
