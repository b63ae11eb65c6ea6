mod memory;

use crate::models::{Video, WatchHistoryEntry};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub use memory::{CatalogFixture, InMemoryStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Catalog Store - video records, newest upload first
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch_candidates(&self, category_filter: Option<String>) -> Result<Vec<Video>>;
}

/// History Store - a viewer's most recent watch events, newest first
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn fetch_recent_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<WatchHistoryEntry>>;
}

/// Metrics Store - like and subscriber counts. Not consulted when ranking.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsStore: Send + Sync {
    async fn like_count(&self, video_id: &str) -> Result<u64>;
    async fn subscriber_count(&self, channel_id: &str) -> Result<u64>;
}

/// Bound a store call; an elapsed deadline becomes `StoreError::Timeout`.
pub async fn with_deadline<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(duration)),
    }
}
