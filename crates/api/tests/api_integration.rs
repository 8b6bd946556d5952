//! API integration tests.
//!
//! These tests drive the `/appeals` router against a mocked database
//! connection and verify status codes and response shapes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use appeals_api::{AppState, router as api_router};
use appeals_core::AppealService;
use appeals_db::entities::appeal::{self, AppealStatus};
use appeals_db::repositories::AppealRepository;
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

fn test_appeal(id: i32, status: AppealStatus) -> appeal::Model {
    appeal::Model {
        id,
        theme: "Printer on fire".to_string(),
        message: "The office printer is literally on fire".to_string(),
        status,
        solution: None,
        cancel_reason: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_app(db: DatabaseConnection) -> Router {
    let state = AppState {
        appeal_service: AppealService::new(AppealRepository::new(Arc::new(db))),
    };
    api_router().with_state(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_started_returns_new_appeals() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[
            test_appeal(1, AppealStatus::New),
            test_appeal(2, AppealStatus::New),
        ]])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/appeals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let appeals = json.as_array().unwrap();
    assert_eq!(appeals.len(), 2);
    assert_eq!(appeals[0]["status"], "New");
}

#[tokio::test]
async fn test_create_appeal_returns_201_with_camel_case_body() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_appeal(7, AppealStatus::New)]])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/appeals")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"theme":"Printer on fire","message":"The office printer is literally on fire"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["id"], 7);
    assert_eq!(json["status"], "New");
    assert!(json["createdAt"].is_string());
    assert!(json["cancelReason"].is_null());
}

#[tokio::test]
async fn test_create_appeal_empty_theme_returns_400() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/appeals")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"theme":"","message":"still broken"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_start_processing_unknown_id_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<appeal::Model>::new()])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/appeals/999/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "APPEAL_NOT_FOUND");
}

#[tokio::test]
async fn test_complete_appeal_returns_updated_entity() {
    let existing = test_appeal(3, AppealStatus::InProgress);
    let mut updated = existing.clone();
    updated.status = AppealStatus::Completed;
    updated.solution = Some("fix applied".to_string());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing], vec![updated]])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/appeals/3/complete")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"solution":"fix applied"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "Completed");
    assert_eq!(json["solution"], "fix applied");
}

#[tokio::test]
async fn test_cancel_all_in_progress_with_nothing_running() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<appeal::Model>::new()])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/appeals/cancel-all-in-progress")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_query_by_dates_without_body_returns_all() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[
            test_appeal(1, AppealStatus::New),
            test_appeal(2, AppealStatus::Completed),
        ]])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/appeals/by-dates")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_query_by_dates_unparseable_date_returns_400() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/appeals/by-dates")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"date":"yesterday"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}
