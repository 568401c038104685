use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::matching::router::{match_handler, pair_handler, MatchRequest};
use crate::matching::{matching_router, MatchingConfig, MatchingService};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("valid request")
}

#[tokio::test]
async fn match_handler_returns_bad_request_without_user_id() {
    let (service, _) = build_service(vec![strong_peer("a")]);

    let response = match_handler::<MemoryRepository>(
        State(Arc::new(service)),
        Ok(axum::Json(MatchRequest::default())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("required"));
}

#[tokio::test]
async fn match_handler_returns_not_found_for_unknown_requester() {
    let (service, _) = build_service(vec![strong_peer("a")]);

    let response = match_handler::<MemoryRepository>(
        State(Arc::new(service)),
        Ok(axum::Json(MatchRequest {
            user_id: Some("ghost".to_string()),
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().unwrap_or_default().contains("ghost"));
}

#[tokio::test]
async fn match_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(MatchingService::new(
        Arc::new(UnavailableRepository),
        MatchingConfig::default(),
    ));

    let response = match_handler::<UnavailableRepository>(
        State(service),
        Ok(axum::Json(MatchRequest {
            user_id: Some("a".to_string()),
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn matching_route_treats_unreadable_bodies_as_missing_user_id() {
    let (service, repository) = build_service(vec![strong_peer("a"), strong_peer("b")]);
    let router = matching_router(Arc::new(service));

    let requests = vec![
        Request::post("/api/matching")
            .body(Body::empty())
            .expect("valid request"),
        json_request("POST", "/api/matching", json!({ "userId": 42 })),
        json_request("POST", "/api/matching", json!({})),
    ];

    for request in requests {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"], json!("user id is required"));
    }
    assert_eq!(repository.list_calls(), 0);
}

#[tokio::test]
async fn matching_route_returns_ranked_payload() {
    let (service, _) = build_service(vec![
        strong_peer("a"),
        strong_peer("b"),
        distant_peer("c"),
    ]);
    let router = matching_router(Arc::new(service));

    let response = router
        .oneshot(json_request("POST", "/api/matching", match_request("a")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["totalPotential"], json!(2));
    assert_eq!(payload["qualifiedMatches"], json!(1));
    let top = &payload["matches"][0];
    assert_eq!(top["user"]["id"], json!("b"));
    assert_eq!(top["score"], json!(88));
    assert_eq!(top["breakdown"]["basicCompatibility"], json!(100));
    assert_eq!(top["breakdown"]["interestAlignment"], json!(100));
    assert_eq!(top["breakdown"]["diversityBalance"], json!(50));
    assert!(top["user"].get("availability").is_none());
}

#[tokio::test]
async fn matching_route_accepts_path_ids() {
    let (service, _) = build_service(vec![strong_peer("a"), strong_peer("b")]);
    let router = matching_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/matching/a")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["requesterId"], json!("a"));
}

#[tokio::test]
async fn pair_handler_scores_a_single_candidate() {
    let (service, _) = build_service(vec![strong_peer("a"), distant_peer("c")]);

    let response = pair_handler::<MemoryRepository>(
        State(Arc::new(service)),
        Path(("a".to_string(), "c".to_string())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["user"]["id"], json!("c"));
    assert_eq!(payload["score"], json!(21));
}

#[tokio::test]
async fn profile_route_upserts_and_feeds_matching() {
    let (service, repository) = build_service(vec![strong_peer("a")]);
    let router = matching_router(Arc::new(service));

    let body = json!({
        "id": "ignored",
        "name": "Jordan",
        "role": "STUDENT",
        "major": "Computer Science",
        "year": 2,
        "availability": { "monday-morning": true, "monday-afternoon": true },
        "careerInterests": [{ "industry": "Tech", "role": "Dev", "priority": "HIGH" }],
        "skills": [{ "skillId": "rust", "level": 2, "targetLevel": 4 }]
    });
    let response = router
        .clone()
        .oneshot(json_request("PUT", "/api/profiles/jordan", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], json!("jordan"));
    assert_eq!(repository.len(), 2);

    let response = router
        .oneshot(
            Request::get("/api/matching/a/jordan")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    // 30 major + 20 year + 2 shared slots * 5
    assert_eq!(payload["breakdown"]["basicCompatibility"], json!(60));
}
