mod config;
pub(crate) mod rules;

pub use config::{RelatedMajors, ScoreWeights, ScoringConfig};

use super::domain::{Profile, ProfileId};
use rules::{score_pair, MAX_SUB_SCORE};
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the rubric configuration to a pair of profiles.
///
/// Holds only immutable configuration, so one instance can be shared across requests.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let config = ScoringConfig {
            weights: config.weights.sanitized(),
            ..config
        };
        Self { config }
    }

    /// Score `candidate` from the point of view of `requester`.
    ///
    /// The result is not symmetric: interest alignment is weighted by the requester's priorities.
    pub fn score(&self, requester: &Profile, candidate: &Profile) -> CompatibilityScore {
        let raw = score_pair(requester, candidate, &self.config.related_majors);
        let weights = self.config.weights;

        let combined = raw.basic * weights.basic
            + raw.interest * weights.interest
            + raw.diversity * weights.diversity;

        CompatibilityScore {
            subject_id: candidate.id.clone(),
            breakdown: ScoreBreakdown {
                basic_compatibility: to_score(raw.basic),
                interest_alignment: to_score(raw.interest),
                diversity_balance: to_score(raw.diversity),
            },
            final_score: to_score(combined),
        }
    }
}

fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, MAX_SUB_SCORE) as u8
}

/// The three independent sub-scores, each within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub basic_compatibility: u8,
    pub interest_alignment: u8,
    pub diversity_balance: u8,
}

/// Compatibility of one candidate with the requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityScore {
    pub subject_id: ProfileId,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
    pub final_score: u8,
}
