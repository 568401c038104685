use metrics_exporter_prometheus::PrometheusHandle;
use peer_match::error::AppError;
use peer_match::matching::{
    MatchingConfig, MatchingService, ProfileId, ProfileRepository, RepositoryError, StudentRecord,
    UserRole,
};
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Profile store kept in insertion order so candidate pools are stable between runs.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<Vec<StudentRecord>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, id: &ProfileId) -> Result<Option<StudentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list_by_role(&self, role: UserRole) -> Result<Vec<StudentRecord>, RepositoryError> {
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

/// Parse a JSON array of stored student rows.
pub(crate) fn load_seed(path: &Path) -> Result<Vec<StudentRecord>, AppError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| AppError::seed(path, source))
}

pub(crate) fn seeded_service(
    config: MatchingConfig,
    records: Vec<StudentRecord>,
) -> Result<Arc<MatchingService<InMemoryProfileRepository>>, AppError> {
    let repository = Arc::new(InMemoryProfileRepository::default());
    let service = MatchingService::new(repository, config);
    for record in records {
        service.register(record)?;
    }
    Ok(Arc::new(service))
}
