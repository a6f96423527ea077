//! Router-level tests over endpoints that do not touch a database.
//!
//! Pools are opened lazily so the full application can be exercised
//! without a running Postgres instance.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use e_helpdesk_api::app::create_app;
use e_helpdesk_api::config::Config;
use e_helpdesk_api::services::storage::InMemoryBlobStorage;
use persistence::db::Databases;

fn test_app() -> Router {
    let config = Config::load_for_test(&[]).expect("test config");
    let databases = Databases::connect_lazy(
        &config.databases.fleet.to_pool_config(),
        &config.databases.helpdesk.to_pool_config(),
        &config.databases.snapshot.to_pool_config(),
    )
    .expect("lazy pools");
    create_app(config, databases, Arc::new(InMemoryBlobStorage::new()))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn liveness_probe_answers_without_database() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "alive");
}

#[tokio::test]
async fn responses_carry_request_id_header() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn caller_supplied_request_id_is_echoed() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health/live")
                .header("X-Request-ID", "req-integration-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-integration-1"
    );
}

#[tokio::test]
async fn vehicles_without_filter_is_a_validation_error() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/vehicles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].as_str().unwrap().contains("code"));
}

#[tokio::test]
async fn ticket_list_rejects_page_zero() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/tickets?page=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn ticket_list_rejects_oversized_page_size() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/tickets?pageSize=10000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn snapshot_compare_rejects_inverted_window() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri(
                    "/api/v1/snapshots/compare?before=2026-02-02T00:00:00Z&after=2026-02-01T00:00:00Z",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chatbot_replies_without_database() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/chatbot")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message":"hello"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["matched"], true);
}

#[tokio::test]
async fn chatbot_rejects_empty_message() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/chatbot")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message":""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn m2m_status_reports_unconfigured() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/integrations/m2m")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["configured"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
