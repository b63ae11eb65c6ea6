use crate::models::{ScoreBreakdown, Video};
use crate::services::profile_builder::AffinityProfile;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Points per watched entry in the candidate's category
pub const CATEGORY_POINTS_PER_WATCH: u32 = 5;
pub const CATEGORY_CAP: u32 = 50;
/// Views per popularity point
pub const VIEWS_PER_POINT: f64 = 1_000.0;
pub const POPULARITY_CAP: f64 = 30.0;
/// Recency starts here and loses one point per day of age
pub const RECENCY_CAP: f64 = 20.0;
pub const WATCHED_PENALTY: f64 = -30.0;

/// Scores one candidate against an affinity profile.
///
/// Priority is category affinity (cap 50) over popularity (cap 30) over
/// recency (cap 20). Already watched videos lose 30 points but are never
/// removed. The total is unclamped and may go negative.
///
/// `now` is fixed at construction so that scoring stays a pure function of
/// `(video, profile)` for the whole pass.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScorer {
    now: DateTime<Utc>,
}

impl CandidateScorer {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn score(&self, video: &Video, profile: &AffinityProfile) -> f64 {
        let breakdown = self.breakdown(video, profile);
        let score = breakdown.total();

        debug!(
            video_id = %video.id,
            category = breakdown.category,
            popularity = breakdown.popularity,
            recency = breakdown.recency,
            watched_penalty = breakdown.watched_penalty,
            score = score,
            "Candidate scored"
        );

        score
    }

    pub fn breakdown(&self, video: &Video, profile: &AffinityProfile) -> ScoreBreakdown {
        ScoreBreakdown {
            category: category_component(profile.category_count(&video.category)),
            popularity: popularity_component(video.view_count.views()),
            recency: recency_component(video.upload_time.age_days(self.now)),
            watched_penalty: if profile.has_watched(&video.id) {
                WATCHED_PENALTY
            } else {
                0.0
            },
        }
    }
}

pub fn category_component(count: u32) -> f64 {
    f64::from(
        count
            .saturating_mul(CATEGORY_POINTS_PER_WATCH)
            .min(CATEGORY_CAP),
    )
}

/// `views` is the codec's decoded value, not the raw stored count.
pub fn popularity_component(views: f64) -> f64 {
    (views / VIEWS_PER_POINT).min(POPULARITY_CAP)
}

pub fn recency_component(age_days: u32) -> f64 {
    (RECENCY_CAP - f64::from(age_days)).max(0.0)
}
