use super::{CatalogStore, HistoryStore, MetricsStore, Result, StoreError};
use crate::models::{Video, WatchHistoryEntry};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Seed data for `InMemoryStore`, as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFixture {
    /// Catalog order, newest upload first
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub history: Vec<WatchHistoryEntry>,
    /// video_id -> likes
    #[serde(default)]
    pub likes: HashMap<String, u64>,
    /// channel_id -> subscribers
    #[serde(default)]
    pub subscribers: HashMap<String, u64>,
}

/// In-memory catalog, history and metrics store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    videos: Vec<Video>,
    history: Vec<WatchHistoryEntry>,
    likes: HashMap<String, u64>,
    subscribers: HashMap<String, u64>,
}

impl InMemoryStore {
    pub fn new(fixture: CatalogFixture) -> Self {
        Self {
            videos: fixture.videos,
            history: fixture.history,
            likes: fixture.likes,
            subscribers: fixture.subscribers,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: CatalogFixture =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidData(e.to_string()))?;
        Ok(Self::new(fixture))
    }

    pub async fn load_fixture(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::Unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;
        let store = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            videos = store.videos.len(),
            history = store.history.len(),
            "Fixture loaded"
        );

        Ok(store)
    }

    pub fn push_video(&mut self, video: Video) {
        self.videos.push(video);
    }

    pub fn push_watch(&mut self, entry: WatchHistoryEntry) {
        self.history.push(entry);
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn fetch_candidates(&self, category_filter: Option<String>) -> Result<Vec<Video>> {
        let videos = self
            .videos
            .iter()
            .filter(|v| match &category_filter {
                Some(category) => &v.category == category,
                None => true,
            })
            .cloned()
            .collect();

        Ok(videos)
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn fetch_recent_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<WatchHistoryEntry>> {
        let mut entries: Vec<WatchHistoryEntry> = self
            .history
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();

        entries.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
        entries.truncate(limit);

        Ok(entries)
    }
}

#[async_trait]
impl MetricsStore for InMemoryStore {
    async fn like_count(&self, video_id: &str) -> Result<u64> {
        Ok(self.likes.get(video_id).copied().unwrap_or(0))
    }

    async fn subscriber_count(&self, channel_id: &str) -> Result<u64> {
        Ok(self.subscribers.get(channel_id).copied().unwrap_or(0))
    }
}
