use serde::{Deserialize, Serialize};

const DEFAULT_MIN_SCORE: u8 = 30;
const DEFAULT_MAX_RESULTS: usize = 10;

/// Cutoff and cap applied after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingPolicy {
    /// Scores must be strictly greater than this to be kept.
    pub min_score: u8,
    pub max_results: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Ranked output plus the pool counts reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    pub entries: Vec<T>,
    pub total_potential: usize,
    pub qualified_matches: usize,
}

impl RankingPolicy {
    /// Sort descending by score, drop entries at or below the cutoff, and cap the list.
    ///
    /// The sort is stable, so equal scores keep their pool order.
    pub fn apply<T, F>(&self, mut scored: Vec<T>, score_of: F) -> Ranked<T>
    where
        F: Fn(&T) -> u8,
    {
        let total_potential = scored.len();

        scored.sort_by(|left, right| score_of(right).cmp(&score_of(left)));
        scored.retain(|entry| score_of(entry) > self.min_score);
        scored.truncate(self.max_results);

        Ranked {
            qualified_matches: scored.len(),
            entries: scored,
            total_potential,
        }
    }
}
