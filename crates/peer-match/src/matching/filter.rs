use super::domain::{ProfileId, StudentRecord};

/// Candidate pool for `requester`: every student other than the requester, in stored order.
///
/// No score-based filtering happens here; that is the ranker's job.
pub fn candidate_pool<I>(requester: &ProfileId, records: I) -> Vec<StudentRecord>
where
    I: IntoIterator<Item = StudentRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_student() && &record.id != requester)
        .collect()
}
