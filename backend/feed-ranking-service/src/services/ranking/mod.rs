/// Ranking Module
///
/// Implicit-feedback ranking for the video feed.
///
/// # Architecture
/// - **Scoring Layer**: `CandidateScorer`, one video against one affinity profile
/// - **Ranker**: path selection (catalog order / popularity / personalized) and
///   stable ordering
///
/// # Workflow
/// 1. Build the affinity profile from the recent history window
/// 2. Score every candidate (category affinity, popularity, recency, watched penalty)
/// 3. Stable sort by score, descending
pub mod ranker;
pub mod scorer;

pub use ranker::{rank_by_popularity, Ranker};
pub use scorer::CandidateScorer;
