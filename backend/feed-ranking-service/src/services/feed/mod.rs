// ============================================
// Feed Service
// ============================================
//
// Orchestrates one feed request:
//
// 1. Resolve the category chip ("Semua" means no filter)
// 2. Personalize only for a signed-in viewer with no active filter
// 3. Fetch history (bounded, deadline); failure degrades to empty history
// 4. Fetch candidates (deadline); failure is the only error surfaced
// 5. Rank and present
//
// Fetches run sequentially, history first. Nothing is cached between calls.

mod presenter;

pub use presenter::{present, FeedItem};

use crate::config::FeedConfig;
use crate::models::{Video, WatchHistoryEntry};
use crate::services::metric_codec::format_views;
use crate::services::profile_builder::{AffinityBuilderConfig, AffinityProfileBuilder};
use crate::services::ranking::Ranker;
use crate::services::stores::{
    with_deadline, CatalogStore, HistoryStore, MetricsStore, StoreError,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[source] StoreError),
}

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Clone, Default)]
pub struct FeedRequest {
    /// Signed-in viewer; `None` for anonymous visitors
    pub user_id: Option<String>,
    /// Active category chip
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngagementSummary {
    pub likes: u64,
    pub subscribers: u64,
    pub likes_label: String,
    pub subscribers_label: String,
}

pub struct FeedService {
    catalog: Arc<dyn CatalogStore>,
    history: Arc<dyn HistoryStore>,
    metrics: Arc<dyn MetricsStore>,
    config: FeedConfig,
}

impl FeedService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        history: Arc<dyn HistoryStore>,
        metrics: Arc<dyn MetricsStore>,
        config: FeedConfig,
    ) -> Self {
        Self {
            catalog,
            history,
            metrics,
            config,
        }
    }

    pub async fn load_feed(&self, request: &FeedRequest) -> Result<Vec<FeedItem>> {
        self.load_feed_at(request, Utc::now()).await
    }

    /// `load_feed` against a fixed clock.
    pub async fn load_feed_at(
        &self,
        request: &FeedRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeedItem>> {
        let videos = self.rank_feed(request, now).await?;
        Ok(present(videos, now))
    }

    /// Ranked videos, before presentation.
    pub async fn rank_feed(&self, request: &FeedRequest, now: DateTime<Utc>) -> Result<Vec<Video>> {
        let filter = self.category_filter(request.category.as_deref());

        let personalized_user = match (&request.user_id, &filter) {
            (Some(user_id), None) => Some(user_id.as_str()),
            _ => None,
        };

        let history = match personalized_user {
            Some(user_id) => self.load_history(user_id).await,
            None => Vec::new(),
        };

        let candidates = with_deadline(
            self.config.fetch_timeout,
            self.catalog.fetch_candidates(filter.clone()),
        )
        .await
        .map_err(FeedError::CatalogUnavailable)?;

        info!(
            user_id = request.user_id.as_deref().unwrap_or("anonymous"),
            category = filter.as_deref().unwrap_or(self.config.all_category.as_str()),
            candidates = candidates.len(),
            history = history.len(),
            "Feed candidates loaded"
        );

        let builder = AffinityProfileBuilder::new(AffinityBuilderConfig {
            history_limit: self.config.history_limit,
        });
        let ranker = Ranker::new(builder, now);

        Ok(ranker.rank(candidates, &history, personalized_user.is_some()))
    }

    /// Like and subscriber counts for the watch page. Lookups that fail read as 0.
    pub async fn engagement(&self, video_id: &str, channel_id: &str) -> EngagementSummary {
        let likes = with_deadline(self.config.fetch_timeout, self.metrics.like_count(video_id))
            .await
            .unwrap_or_else(|e| {
                warn!(video_id = video_id, error = %e, "Like count lookup failed");
                0
            });
        let subscribers = with_deadline(
            self.config.fetch_timeout,
            self.metrics.subscriber_count(channel_id),
        )
        .await
        .unwrap_or_else(|e| {
            warn!(channel_id = channel_id, error = %e, "Subscriber count lookup failed");
            0
        });

        EngagementSummary {
            likes,
            subscribers,
            likes_label: format_views(likes),
            subscribers_label: format_views(subscribers),
        }
    }

    /// History failures are not fatal; the ranker falls back to popularity.
    async fn load_history(&self, user_id: &str) -> Vec<WatchHistoryEntry> {
        match with_deadline(
            self.config.fetch_timeout,
            self.history
                .fetch_recent_history(user_id, self.config.history_limit),
        )
        .await
        {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    user_id = user_id,
                    error = %e,
                    "History fetch failed, falling back to popularity ranking"
                );
                Vec::new()
            }
        }
    }

    fn category_filter(&self, category: Option<&str>) -> Option<String> {
        category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != self.config.all_category)
            .map(str::to_string)
    }
}
