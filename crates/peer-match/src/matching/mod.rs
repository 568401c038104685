//! Peer matching: candidate filtering, compatibility scoring, and ranking.
//!
//! Data flows one way. Stored records are narrowed to the candidate pool, each candidate is scored
//! against the requester, and the ranker sorts, cuts off, and caps the list. The engine itself is
//! pure; storage and HTTP live behind [`ProfileRepository`] and [`matching_router`].

mod availability;
pub mod domain;
pub mod filter;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use availability::Availability;
pub use domain::{
    CareerInterest, Priority, Profile, ProfileId, SkillEntry, StudentRecord, UserRole, UserSummary,
};
pub use filter::candidate_pool;
pub use ranking::{Ranked, RankingPolicy};
pub use repository::{MatchEntry, MatchReport, ProfileRepository, RepositoryError};
pub use router::{matching_router, MatchRequest};
pub use scoring::{
    CompatibilityScore, RelatedMajors, ScoreBreakdown, ScoreWeights, ScoringConfig, ScoringEngine,
};
pub use service::{MatchingService, MatchingServiceError};

/// Scoring rubric plus ranking policy, as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub ranking: RankingPolicy,
}
