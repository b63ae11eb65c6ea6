use crate::services::metric_codec::{age_in_days, format_views, parse_views, to_relative_age};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog video as returned by the catalog store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub category: String,
    pub channel_id: String,
    pub view_count: ViewCount,
    pub upload_time: UploadTime,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub embed_link: String,
    #[serde(default)]
    pub description: String,
}

/// View count as stored (raw integer) or as already rendered ("1.2 Juta").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ViewCount {
    Count(u64),
    Label(String),
}

impl ViewCount {
    /// Display label; raw counts go through `format_views`.
    pub fn label(&self) -> String {
        match self {
            ViewCount::Count(n) => format_views(*n),
            ViewCount::Label(label) => label.clone(),
        }
    }

    /// Views as the ranking sees them, i.e. decoded from the display label.
    /// Raw counts therefore carry the one-decimal rounding of the label.
    pub fn views(&self) -> f64 {
        match self {
            ViewCount::Count(n) => parse_views(&format_views(*n)),
            ViewCount::Label(label) => parse_views(label),
        }
    }
}

/// Upload time as a timestamp or an already rendered relative-age label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UploadTime {
    At(DateTime<Utc>),
    Label(String),
}

impl UploadTime {
    pub fn label(&self, now: DateTime<Utc>) -> String {
        match self {
            UploadTime::At(ts) => to_relative_age(*ts, now),
            UploadTime::Label(label) => label.clone(),
        }
    }

    /// Estimated age in whole days, decoded from the relative-age label.
    pub fn age_days(&self, now: DateTime<Utc>) -> u32 {
        age_in_days(&self.label(now))
    }
}

/// One watch event. `category` and `channel_id` are denormalized from the
/// referenced video and are `None` once that video has been deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchHistoryEntry {
    pub user_id: String,
    pub video_id: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    pub watched_at: DateTime<Utc>,
}

/// Per-component score of one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub category: f64,
    pub popularity: f64,
    pub recency: f64,
    pub watched_penalty: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.category + self.popularity + self.recency + self.watched_penalty
    }
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub video: Video,
    pub score: f64,
}

/// Which ordering the ranker applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingPath {
    CatalogOrder, // personalization disabled
    Popularity,   // personalized, but no history
    Personalized,
}

impl RankingPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingPath::CatalogOrder => "catalog_order",
            RankingPath::Popularity => "popularity",
            RankingPath::Personalized => "personalized",
        }
    }
}
