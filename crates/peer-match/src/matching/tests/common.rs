use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Map, Value};

use crate::matching::domain::{
    CareerInterest, Priority, Profile, ProfileId, SkillEntry, StudentRecord, UserRole,
};
use crate::matching::repository::{ProfileRepository, RepositoryError};
use crate::matching::scoring::ScoringEngine;
use crate::matching::{MatchingConfig, MatchingService};

pub(super) const TEN_SLOTS: [&str; 10] = [
    "monday-morning",
    "monday-afternoon",
    "tuesday-morning",
    "tuesday-afternoon",
    "wednesday-morning",
    "wednesday-afternoon",
    "thursday-morning",
    "thursday-afternoon",
    "friday-morning",
    "friday-afternoon",
];

pub(super) fn interest(industry: &str, role: &str, priority: Priority) -> CareerInterest {
    CareerInterest {
        industry: industry.to_string(),
        role: role.to_string(),
        priority,
    }
}

pub(super) fn availability(slots: &[&str]) -> Value {
    let map: Map<String, Value> = slots
        .iter()
        .map(|slot| (slot.to_string(), Value::Bool(true)))
        .collect();
    Value::String(Value::Object(map).to_string())
}

pub(super) fn student(id: &str, major: &str, year: i32) -> StudentRecord {
    StudentRecord {
        id: ProfileId::new(id),
        name: format!("Student {id}"),
        role: UserRole::Student,
        major: major.to_string(),
        year,
        availability: None,
        career_interests: Vec::new(),
        skills: Vec::new(),
    }
}

pub(super) fn with_slots(mut record: StudentRecord, slots: &[&str]) -> StudentRecord {
    record.availability = Some(availability(slots));
    record
}

pub(super) fn with_interests(
    mut record: StudentRecord,
    interests: Vec<CareerInterest>,
) -> StudentRecord {
    record.career_interests = interests;
    record
}

pub(super) fn with_skills(mut record: StudentRecord, skills: &[&str]) -> StudentRecord {
    record.skills = skills
        .iter()
        .map(|skill_id| SkillEntry {
            skill_id: skill_id.to_string(),
            level: 2,
            target_level: 4,
        })
        .collect();
    record
}

/// A student who matches `strong_peer` on every basic and interest signal.
pub(super) fn strong_peer(id: &str) -> StudentRecord {
    let record = with_slots(student(id, "Computer Science", 2), &TEN_SLOTS);
    with_interests(record, vec![interest("Tech", "Dev", Priority::High)])
}

/// A student far from `strong_peer`: unrelated major, distant year, no shared signals.
pub(super) fn distant_peer(id: &str) -> StudentRecord {
    student(id, "Art History", 6)
}

pub(super) fn profile(record: &StudentRecord) -> Profile {
    record.profile()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(MatchingConfig::default().scoring)
}

pub(super) fn build_service(
    records: Vec<StudentRecord>,
) -> (MatchingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::with_records(records));
    let service = MatchingService::new(repository.clone(), MatchingConfig::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<StudentRecord>>>,
    list_calls: Arc<AtomicUsize>,
}

impl MemoryRepository {
    pub(super) fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(super) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ProfileRepository for MemoryRepository {
    fn fetch(&self, id: &ProfileId) -> Result<Option<StudentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list_by_role(&self, role: UserRole) -> Result<Vec<StudentRecord>, RepositoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.role == role)
            .cloned()
            .collect())
    }

    fn upsert(&self, record: StudentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => guard.push(record),
        }
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn fetch(&self, _id: &ProfileId) -> Result<Option<StudentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_role(&self, _role: UserRole) -> Result<Vec<StudentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _record: StudentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn match_request(user_id: &str) -> Value {
    json!({ "userId": user_id })
}
