use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::domain::{ProfileId, StudentRecord};
use super::repository::ProfileRepository;
use super::service::{MatchingService, MatchingServiceError};

/// Body accepted by `POST /api/matching`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Router builder exposing the matching endpoints.
pub fn matching_router<R>(service: Arc<MatchingService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/matching", post(match_handler::<R>))
        .route("/api/matching/:user_id", get(match_by_path_handler::<R>))
        .route(
            "/api/matching/:user_id/:candidate_id",
            get(pair_handler::<R>),
        )
        .route("/api/profiles/:user_id", put(upsert_profile_handler::<R>))
        .with_state(service)
}

pub(crate) async fn match_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    body: Result<axum::Json<MatchRequest>, JsonRejection>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    // An absent or unreadable body carries no requester id.
    let request = match body {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "unreadable match request body");
            MatchRequest::default()
        }
    };

    match service.find_matches(request.user_id.as_deref()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn match_by_path_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.find_matches(Some(user_id.as_str())) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn pair_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    Path((user_id, candidate_id)): Path<(String, String)>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.score_pair(&user_id, &candidate_id) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn upsert_profile_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(mut record): axum::Json<StudentRecord>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    record.id = ProfileId::new(user_id);
    match service.register(record) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored.summary())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn status_for(error: &MatchingServiceError) -> StatusCode {
    match error {
        MatchingServiceError::MissingRequester => StatusCode::BAD_REQUEST,
        MatchingServiceError::RequesterNotFound(_) | MatchingServiceError::CandidateNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        MatchingServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: MatchingServiceError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        warn!(error = %error, "matching request failed");
    }

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
