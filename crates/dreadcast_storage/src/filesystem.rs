//! Filesystem-backed story store.
//!
//! Each story lives in its own pretty-printed JSON file named after its
//! identifier:
//!
//! ```text
//! reddit_stories/
//! ├── 1abc23.json
//! ├── 1abd99.json
//! └── 1b0x4f.json
//! ```

use crate::validate_story;
use async_trait::async_trait;
use chrono::Utc;
use dreadcast_core::{Story, StoryId};
use dreadcast_error::{DreadcastResult, NotFoundError, StorageError, StorageErrorKind};
use dreadcast_interface::StoryStore;
use std::path::{Path, PathBuf};

const RECORD_EXTENSION: &str = "json";

/// Story store writing one JSON file per record.
///
/// # Features
///
/// - **Upsert by identifier**: saving an existing id replaces the file
/// - **Atomic writes**: temp file + rename
/// - **Validated loads**: encoding, schema, id/filename agreement and
///   non-empty body are checked for every record
#[derive(Debug, Clone)]
pub struct FileSystemStoryStore {
    base_path: PathBuf,
}

impl FileSystemStoryStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> DreadcastResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %base_path.display(), "Opened filesystem story store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the record file for an identifier.
    fn record_path(&self, id: &StoryId) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", id.as_str(), RECORD_EXTENSION))
    }

    /// Decode and validate a record read from `path`.
    fn decode_record(path: &Path, bytes: Vec<u8>) -> DreadcastResult<Story> {
        let text = String::from_utf8(bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Malformed(format!(
                "{}: invalid UTF-8: {}",
                path.display(),
                e
            )))
        })?;

        let story: Story = serde_json::from_str(&text).map_err(|e| {
            StorageError::new(StorageErrorKind::Malformed(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        if let Some(defect) = story.defect() {
            return Err(StorageError::new(StorageErrorKind::Malformed(format!(
                "{}: {} (id {:?})",
                path.display(),
                defect,
                story.id().as_str()
            )))
            .into());
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem != story.id().as_str() {
            return Err(StorageError::new(StorageErrorKind::Malformed(format!(
                "{}: identifier {} does not match filename",
                path.display(),
                story.id()
            )))
            .into());
        }

        Ok(story)
    }

    /// Read a record, mapping a missing file to `None`.
    async fn read_record(&self, id: &StoryId) -> DreadcastResult<Option<Story>> {
        if !id.is_storage_safe() {
            return Ok(None);
        }

        let path = self.record_path(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(Self::decode_record(&path, bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    /// Serialize and atomically replace the record file.
    async fn write_record(&self, story: &Story) -> DreadcastResult<()> {
        let path = self.record_path(story.id());

        let json = serde_json::to_string_pretty(story).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                story.id(),
                e
            )))
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json.as_bytes())
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    temp_path.display(),
                    e
                )))
            })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl StoryStore for FileSystemStoryStore {
    #[tracing::instrument(skip(self), fields(path = %self.base_path.display()))]
    async fn load_all(&self) -> DreadcastResult<Vec<Story>> {
        let mut entries = tokio::fs::read_dir(&self.base_path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
        })?;

        let mut stories = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.base_path.display(),
                    e
                )))
            })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if !path.is_file() {
                continue;
            }

            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
            stories.push(Self::decode_record(&path, bytes)?);
        }

        stories.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        tracing::debug!(count = stories.len(), "Loaded story records");
        Ok(stories)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: &StoryId) -> DreadcastResult<Story> {
        self.read_record(id)
            .await?
            .ok_or_else(|| NotFoundError::new(id.as_str()).into())
    }

    async fn contains(&self, id: &StoryId) -> DreadcastResult<bool> {
        if !id.is_storage_safe() {
            return Ok(false);
        }
        let path = self.record_path(id);
        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(exists)
    }

    #[tracing::instrument(skip(self, story), fields(id = %story.id()))]
    async fn save(&self, story: &Story) -> DreadcastResult<()> {
        validate_story(story)?;

        let mut record = story.clone();
        if let Some(existing) = self.read_record(story.id()).await? {
            record.inherit_processed(&existing);
            tracing::debug!(processed = record.processed(), "Overwriting existing story");
        }

        self.write_record(&record).await?;

        tracing::info!(
            id = %record.id(),
            score = record.score(),
            "Saved story"
        );
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn mark_processed(&self, id: &StoryId) -> DreadcastResult<Story> {
        let mut story = self.get(id).await?;

        if story.processed() {
            tracing::debug!("Story already processed");
            return Ok(story);
        }

        story.mark_processed(Utc::now());
        self.write_record(&story).await?;

        tracing::info!(id = %id, "Marked story processed");
        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let path = Path::new("/tmp/stories/abc.json");
        let result = FileSystemStoryStore::decode_record(path, vec![0xff, 0xfe, 0x00]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_mismatched_filename() {
        let path = Path::new("/tmp/stories/other.json");
        let json = br#"{"id":"abc","title":"t","body":"b","score":1,"created_at":"2025-10-01T00:00:00Z"}"#;
        let result = FileSystemStoryStore::decode_record(path, json.to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_empty_body() {
        let path = Path::new("/tmp/stories/abc.json");
        let json = br#"{"id":"abc","title":"t","body":"   ","score":1,"created_at":"2025-10-01T00:00:00Z"}"#;
        let result = FileSystemStoryStore::decode_record(path, json.to_vec());
        assert!(result.is_err());
    }
}
