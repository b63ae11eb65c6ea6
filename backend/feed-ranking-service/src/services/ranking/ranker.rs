use super::scorer::CandidateScorer;
use crate::models::{RankingPath, ScoredCandidate, Video, WatchHistoryEntry};
use crate::services::profile_builder::AffinityProfileBuilder;
use chrono::{DateTime, Utc};
use tracing::info;

/// Ranker - orders catalog candidates for one viewer.
///
/// Three paths:
/// - personalization disabled: catalog order (newest upload first), no scoring
/// - personalization enabled, no history: popularity descending
/// - personalization enabled, with history: affinity score descending
///
/// All sorts are stable, so ties keep catalog order. No candidate is ever
/// dropped.
pub struct Ranker {
    builder: AffinityProfileBuilder,
    scorer: CandidateScorer,
}

impl Ranker {
    pub fn new(builder: AffinityProfileBuilder, now: DateTime<Utc>) -> Self {
        Self {
            builder,
            scorer: CandidateScorer::new(now),
        }
    }

    pub fn rank(
        &self,
        candidates: Vec<Video>,
        history_window: &[WatchHistoryEntry],
        personalization_enabled: bool,
    ) -> Vec<Video> {
        self.rank_with_path(candidates, history_window, personalization_enabled)
            .1
    }

    /// Same as `rank`, also reporting which path produced the order.
    pub fn rank_with_path(
        &self,
        candidates: Vec<Video>,
        history_window: &[WatchHistoryEntry],
        personalization_enabled: bool,
    ) -> (RankingPath, Vec<Video>) {
        let candidate_count = candidates.len();

        if !personalization_enabled {
            info!(
                candidates = candidate_count,
                path = RankingPath::CatalogOrder.as_str(),
                "Feed ranked"
            );
            return (RankingPath::CatalogOrder, candidates);
        }

        let profile = self.builder.build(history_window);

        let (path, ranked) = if profile.is_empty() {
            (RankingPath::Popularity, rank_by_popularity(candidates))
        } else {
            let mut scored: Vec<ScoredCandidate> = candidates
                .into_iter()
                .map(|video| {
                    let score = self.scorer.score(&video, &profile);
                    ScoredCandidate { video, score }
                })
                .collect();

            // Vec::sort_by is stable
            scored.sort_by(|a, b| b.score.total_cmp(&a.score));

            (
                RankingPath::Personalized,
                scored.into_iter().map(|c| c.video).collect(),
            )
        };

        info!(
            candidates = candidate_count,
            history = history_window.len(),
            categories = profile.category_counts.len(),
            path = path.as_str(),
            "Feed ranked"
        );

        (path, ranked)
    }
}

/// Popularity-only ordering; ties keep catalog order.
pub fn rank_by_popularity(mut candidates: Vec<Video>) -> Vec<Video> {
    candidates.sort_by(|a, b| b.view_count.views().total_cmp(&a.view_count.views()));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UploadTime, ViewCount};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 16, 12, 0, 0).unwrap()
    }

    fn video(id: &str, category: &str, views: &str, uploaded: &str) -> Video {
        Video {
            id: id.to_string(),
            category: category.to_string(),
            channel_id: format!("ch-{}", id),
            view_count: ViewCount::Label(views.to_string()),
            upload_time: UploadTime::Label(uploaded.to_string()),
            title: String::new(),
            channel_name: String::new(),
            thumbnail_url: String::new(),
            embed_link: String::new(),
            description: String::new(),
        }
    }

    fn watch(video_id: &str, category: &str) -> WatchHistoryEntry {
        WatchHistoryEntry {
            user_id: "viewer".to_string(),
            video_id: video_id.to_string(),
            category: Some(category.to_string()),
            channel_id: Some(format!("ch-{}", video_id)),
            watched_at: now(),
        }
    }

    fn ids(videos: &[Video]) -> Vec<&str> {
        videos.iter().map(|v| v.id.as_str()).collect()
    }

    fn ranker() -> Ranker {
        Ranker::new(AffinityProfileBuilder::default(), now())
    }

    #[test]
    fn test_disabled_keeps_catalog_order() {
        let candidates = vec![
            video("new", "Sains", "10", "Baru saja"),
            video("popular", "Musik", "9.9 Juta", "3 bulan lalu"),
        ];
        let history = vec![watch("x", "Musik")];

        let (path, ranked) = ranker().rank_with_path(candidates, &history, false);

        assert_eq!(path, RankingPath::CatalogOrder);
        assert_eq!(ids(&ranked), vec!["new", "popular"]);
    }

    #[test]
    fn test_empty_history_ranks_by_popularity() {
        let candidates = vec![
            video("a", "Sains", "850 Ribu", "1 hari lalu"),
            video("b", "Sains", "1.2 Juta", "2 hari lalu"),
            video("c", "Sains", "999", "3 hari lalu"),
        ];

        let (path, ranked) = ranker().rank_with_path(candidates, &[], true);

        assert_eq!(path, RankingPath::Popularity);
        assert_eq!(ids(&ranked), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_popularity_ties_keep_catalog_order() {
        let candidates = vec![
            video("first", "Sains", "5 Ribu", "1 hari lalu"),
            video("second", "Musik", "5000", "2 hari lalu"),
            video("third", "Sains", "5.0 Ribu", "3 hari lalu"),
        ];

        let ranked = ranker().rank(candidates, &[], true);

        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_personalized_scenario() {
        let mut history: Vec<WatchHistoryEntry> =
            (0..10).map(|i| watch(&format!("m{}", i), "Musik")).collect();
        history.push(watch("b", "Olahraga"));
        history.push(watch("o2", "Olahraga"));
        history.push(watch("g1", "Gaming"));

        let candidates = vec![
            video("b", "Olahraga", "50.0 Ribu", "40 hari lalu"),
            video("a", "Musik", "12.0 Ribu", "5 hari lalu"),
        ];

        let (path, ranked) = ranker().rank_with_path(candidates, &history, true);

        assert_eq!(path, RankingPath::Personalized);
        assert_eq!(ids(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn test_score_ties_keep_catalog_order() {
        let history = vec![watch("h", "Musik")];
        let candidates = vec![
            video("x", "Sains", "1 Ribu", "Baru saja"),
            video("y", "Sains", "1 Ribu", "Baru saja"),
            video("z", "Sains", "1 Ribu", "Baru saja"),
        ];

        let ranked = ranker().rank(candidates, &history, true);

        assert_eq!(ids(&ranked), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_watched_video_is_demoted_not_removed() {
        let history = vec![watch("seen", "Musik")];
        let candidates = vec![
            video("seen", "Musik", "20 Ribu", "1 hari lalu"),
            video("fresh", "Musik", "20 Ribu", "1 hari lalu"),
        ];

        let ranked = ranker().rank(candidates, &history, true);

        assert_eq!(ids(&ranked), vec!["fresh", "seen"]);
    }

    #[test]
    fn test_on_topic_rewatch_can_beat_unrelated_stale_video() {
        let history: Vec<WatchHistoryEntry> = (0..10).map(|_| watch("seen", "Musik")).collect();
        let candidates = vec![
            video("stale", "Berita", "100", "2 bulan lalu"),
            video("seen", "Musik", "10 Ribu", "2 hari lalu"),
        ];

        let ranked = ranker().rank(candidates, &history, true);

        assert_eq!(ids(&ranked), vec!["seen", "stale"]);
    }

    #[test]
    fn test_output_is_permutation_of_input() {
        let history = vec![watch("v3", "Musik"), watch("v7", "Gaming")];
        let candidates: Vec<Video> = (0..25)
            .map(|i| {
                let category = ["Musik", "Gaming", "Sains"][i % 3];
                let views = format!("{} Ribu", (i * 7) % 40);
                let uploaded = format!("{} hari lalu", (i * 3) % 30);
                video(&format!("v{}", i), category, &views, &uploaded)
            })
            .collect();
        let input_ids: HashSet<String> = candidates.iter().map(|v| v.id.clone()).collect();

        for enabled in [false, true] {
            for window in [&history[..], &[][..]] {
                let ranked = ranker().rank(candidates.clone(), window, enabled);
                assert_eq!(ranked.len(), candidates.len());
                let output_ids: HashSet<String> = ranked.iter().map(|v| v.id.clone()).collect();
                assert_eq!(output_ids, input_ids);
            }
        }
    }
}
