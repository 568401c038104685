use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{ProfileId, StudentRecord, UserRole};
use super::filter::candidate_pool;
use super::ranking::RankingPolicy;
use super::repository::{MatchEntry, MatchReport, ProfileRepository, RepositoryError};
use super::scoring::ScoringEngine;
use super::MatchingConfig;

/// Service composing the profile repository, scoring engine, and ranking policy.
pub struct MatchingService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
    ranking: RankingPolicy,
}

impl<R> MatchingService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: MatchingConfig) -> Self {
        Self {
            repository,
            engine: ScoringEngine::new(config.scoring),
            ranking: config.ranking,
        }
    }

    pub fn ranking(&self) -> RankingPolicy {
        self.ranking
    }

    /// Rank the student cohort against `requester_id`.
    ///
    /// The requester is resolved before any candidate is loaded or scored.
    pub fn find_matches(
        &self,
        requester_id: Option<&str>,
    ) -> Result<MatchReport, MatchingServiceError> {
        let requester_id = validate_requester(requester_id)?;
        let requester = self
            .repository
            .fetch(&requester_id)?
            .ok_or_else(|| MatchingServiceError::RequesterNotFound(requester_id.clone()))?;
        let requester_profile = requester.profile();

        let pool = candidate_pool(
            &requester_id,
            self.repository.list_by_role(UserRole::Student)?,
        );

        let scored: Vec<MatchEntry> = pool
            .iter()
            .map(|candidate| {
                let score = self.engine.score(&requester_profile, &candidate.profile());
                MatchEntry::new(candidate, score)
            })
            .collect();

        let ranked = self.ranking.apply(scored, |entry| entry.score);

        info!(
            requester_id = %requester_id,
            total_potential = ranked.total_potential,
            qualified_matches = ranked.qualified_matches,
            "ranked peer matches"
        );

        Ok(MatchReport {
            requester_id,
            matches: ranked.entries,
            total_potential: ranked.total_potential,
            qualified_matches: ranked.qualified_matches,
        })
    }

    /// Score a single candidate for the requester, bypassing the cutoff and cap.
    pub fn score_pair(
        &self,
        requester_id: &str,
        candidate_id: &str,
    ) -> Result<MatchEntry, MatchingServiceError> {
        let requester_id = validate_requester(Some(requester_id))?;
        let requester = self
            .repository
            .fetch(&requester_id)?
            .ok_or_else(|| MatchingServiceError::RequesterNotFound(requester_id.clone()))?;

        let candidate_id = ProfileId::new(candidate_id.trim());
        let candidate = self
            .repository
            .fetch(&candidate_id)?
            .filter(|record| record.id != requester.id)
            .ok_or(MatchingServiceError::CandidateNotFound(candidate_id))?;

        let score = self.engine.score(&requester.profile(), &candidate.profile());
        debug!(
            requester_id = %requester.id,
            candidate_id = %candidate.id,
            final_score = score.final_score,
            "scored single pairing"
        );

        Ok(MatchEntry::new(&candidate, score))
    }

    /// Store or replace a profile.
    ///
    /// The id is stored trimmed.
    pub fn register(
        &self,
        mut record: StudentRecord,
    ) -> Result<StudentRecord, MatchingServiceError> {
        record.id = validate_requester(Some(record.id.as_str()))?;
        self.repository.upsert(record.clone())?;
        Ok(record)
    }
}

fn validate_requester(requester_id: Option<&str>) -> Result<ProfileId, MatchingServiceError> {
    match requester_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(ProfileId::new(id)),
        _ => Err(MatchingServiceError::MissingRequester),
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error("user id is required")]
    MissingRequester,
    #[error("user {0} not found")]
    RequesterNotFound(ProfileId),
    #[error("candidate {0} not found")]
    CandidateNotFound(ProfileId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
