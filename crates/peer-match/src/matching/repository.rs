use serde::{Deserialize, Serialize};

use super::domain::{ProfileId, StudentRecord, UserRole, UserSummary};
use super::scoring::{CompatibilityScore, ScoreBreakdown};

/// Read access to stored profiles, with interests and skills already joined.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, id: &ProfileId) -> Result<Option<StudentRecord>, RepositoryError>;
    fn list_by_role(&self, role: UserRole) -> Result<Vec<StudentRecord>, RepositoryError>;
    fn upsert(&self, record: StudentRecord) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// One ranked candidate as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntry {
    pub user: UserSummary,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

impl MatchEntry {
    pub fn new(record: &StudentRecord, score: CompatibilityScore) -> Self {
        Self {
            user: record.summary(),
            score: score.final_score,
            breakdown: score.breakdown,
        }
    }
}

/// Ranked shortlist for a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub requester_id: ProfileId,
    pub matches: Vec<MatchEntry>,
    pub total_potential: usize,
    pub qualified_matches: usize,
}

impl MatchReport {
    pub fn top(&self) -> Option<&MatchEntry> {
        self.matches.first()
    }
}
