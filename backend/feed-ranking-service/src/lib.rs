pub mod config;
pub mod models;
pub mod services;

pub use config::Config;
pub use services::{
    AffinityProfile, AffinityProfileBuilder, CandidateScorer, FeedRequest, FeedService, Ranker,
};
