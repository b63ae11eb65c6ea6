// ============================================
// Affinity Profile Builder
// ============================================
//
// Folds a viewer's recent watch history into interaction counts:
//
//   category_counts[category]  += 1   per entry
//   channel_counts[channel_id] += 1   per entry
//   watched_ids                 ∪= { video_id }
//
// Rewatches count once per occurrence. Entries whose video has been deleted
// (no denormalized category/channel) add nothing to the counts but the video
// still counts as watched.

use crate::models::WatchHistoryEntry;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Default size of the history window.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Per-viewer aggregate, rebuilt on every ranking pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffinityProfile {
    pub category_counts: HashMap<String, u32>,
    /// Computed for completeness; the scorer does not weight channels.
    pub channel_counts: HashMap<String, u32>,
    pub watched_ids: HashSet<String>,
}

impl AffinityProfile {
    /// No history at all, i.e. no personalization signal.
    pub fn is_empty(&self) -> bool {
        self.category_counts.is_empty()
            && self.channel_counts.is_empty()
            && self.watched_ids.is_empty()
    }

    pub fn category_count(&self, category: &str) -> u32 {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    pub fn channel_count(&self, channel_id: &str) -> u32 {
        self.channel_counts.get(channel_id).copied().unwrap_or(0)
    }

    pub fn has_watched(&self, video_id: &str) -> bool {
        self.watched_ids.contains(video_id)
    }
}

#[derive(Debug, Clone)]
pub struct AffinityBuilderConfig {
    /// Entries beyond this many (newest first) are ignored
    pub history_limit: usize,
}

impl Default for AffinityBuilderConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

pub struct AffinityProfileBuilder {
    config: AffinityBuilderConfig,
}

impl Default for AffinityProfileBuilder {
    fn default() -> Self {
        Self::new(AffinityBuilderConfig::default())
    }
}

impl AffinityProfileBuilder {
    pub fn new(config: AffinityBuilderConfig) -> Self {
        Self { config }
    }

    /// Build a profile from a newest-first history window.
    pub fn build(&self, history_window: &[WatchHistoryEntry]) -> AffinityProfile {
        let mut profile = AffinityProfile::default();
        let mut skipped = 0usize;

        for entry in history_window.iter().take(self.config.history_limit) {
            profile.watched_ids.insert(entry.video_id.clone());

            match (&entry.category, &entry.channel_id) {
                (Some(category), Some(channel_id)) => {
                    *profile.category_counts.entry(category.clone()).or_insert(0) += 1;
                    *profile.channel_counts.entry(channel_id.clone()).or_insert(0) += 1;
                }
                _ => skipped += 1,
            }
        }

        debug!(
            window = history_window.len().min(self.config.history_limit),
            categories = profile.category_counts.len(),
            channels = profile.channel_counts.len(),
            watched = profile.watched_ids.len(),
            skipped = skipped,
            "Affinity profile built"
        );

        profile
    }
}
