pub mod feed;
pub mod metric_codec;
pub mod profile_builder;
pub mod ranking;
pub mod stores;

pub use feed::{EngagementSummary, FeedError, FeedItem, FeedRequest, FeedService};
pub use profile_builder::{AffinityProfile, AffinityProfileBuilder};
pub use ranking::{CandidateScorer, Ranker};
pub use stores::{CatalogStore, HistoryStore, InMemoryStore, MetricsStore, StoreError};
