// ============================================
// Profile Builder
// ============================================
//
// Builds the per-viewer affinity profile used by the scorer from the
// viewer's recent watch history. Profiles are ephemeral: one per ranking
// pass, never cached or persisted.

pub mod affinity_builder;

pub use affinity_builder::{
    AffinityBuilderConfig, AffinityProfile, AffinityProfileBuilder, DEFAULT_HISTORY_LIMIT,
};
