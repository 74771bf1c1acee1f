
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    routing::{delete, get, post},
    Json, Router,
};
use axum_test::TestServer;
use kairo_api::{
    build_router,
    handlers::proxy::{is_forwardable, rewrite_target},
    ApiState,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

async fn spawn_backend() -> String {
    let app = Router::new()
        .route(
            "/api/v1/students/:enrollment/timetable",
            get(
                |Path(enrollment): Path<String>,
                 Query(query): Query<HashMap<String, String>>| async move {
                    if enrollment == "missing" {
                        return (
                            StatusCode::NOT_FOUND,
                            Json(json!({ "detail": "Student not found" })),
                        );
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "enrollment": enrollment,
                            "weekOffset": query.get("week_offset").cloned(),
                        })),
                    )
                },
            ),
        )
        .route(
            "/api/v1/timetables/generate",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let request_id = headers
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                (
                    StatusCode::ACCEPTED,
                    Json(json!({ "received": body, "requestId": request_id })),
                )
            }),
        )
        .route(
            "/api/v1/faculty/:code/leave",
            delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/v1/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "late": true }))
            }),
        )
        .route(
            "/api/v1/students/:enrollment/export/pdf",
            get(|| async {
                (
                    StatusCode::NOT_IMPLEMENTED,
                    Json(json!({ "detail": "PDF export not yet implemented" })),
                )
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn gateway(backend_url: &str) -> TestServer {
    gateway_with_timeout(backend_url, Duration::from_secs(5)).await
}

async fn gateway_with_timeout(backend_url: &str, timeout: Duration) -> TestServer {
    let state = ApiState::new(backend_url, timeout).unwrap();
    TestServer::new(build_router(Arc::new(state))).unwrap()
}

#[tokio::test]
async fn test_forwards_path_and_query() {
    let server = gateway(&spawn_backend().await).await;

    let response = server
        .get("/api/v1/students/2023001/timetable")
        .add_query_param("week_offset", "1")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["enrollment"], "2023001");
    assert_eq!(body["weekOffset"], "1");
}

#[tokio::test]
async fn test_passes_backend_status_through() {
    let server = gateway(&spawn_backend().await).await;

    let missing = server.get("/api/v1/students/missing/timetable").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["detail"], "Student not found");

    let export = server.get("/api/v1/students/2023001/export/pdf").await;
    assert_eq!(export.status_code(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_forwards_post_body_and_headers() {
    let server = gateway(&spawn_backend().await).await;

    let response = server
        .post("/api/v1/timetables/generate")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-42"),
        )
        .json(&json!({ "semester": 3, "program": "B.Ed" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    let body: Value = response.json();
    assert_eq!(body["received"], json!({ "semester": 3, "program": "B.Ed" }));
    assert_eq!(body["requestId"], "req-42");
}

#[tokio::test]
async fn test_forwards_other_methods() {
    let server = gateway(&spawn_backend().await).await;

    let response = server.delete("/api/v1/faculty/F001/leave").await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_slow_backend_is_bad_gateway() {
    let server = gateway_with_timeout(&spawn_backend().await, Duration::from_millis(200)).await;

    let response = server.get("/api/v1/slow").await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["kind"], "unreachable");
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    let server = gateway(test_utils::DEAD_BACKEND).await;

    let response = server.get("/api/v1/faculty/F001/schedule").await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["kind"], "unreachable");
}

#[test]
fn test_rewrite_target() {
    let uri: Uri = "/api/v1/faculty/F001/schedule?week_offset=2".parse().unwrap();
    assert_eq!(
        rewrite_target("http://backend:8000", &uri),
        "http://backend:8000/api/v1/faculty/F001/schedule?week_offset=2"
    );

    let uri: Uri = "/api/v1/students/2023001/timetable".parse().unwrap();
    assert_eq!(
        rewrite_target("http://localhost:8000", &uri),
        "http://localhost:8000/api/v1/students/2023001/timetable"
    );
}

#[test]
fn test_hop_by_hop_headers_are_not_forwarded() {
    assert!(!is_forwardable(&HeaderName::from_static("host")));
    assert!(!is_forwardable(&HeaderName::from_static("transfer-encoding")));
    assert!(!is_forwardable(&HeaderName::from_static("content-length")));
    assert!(is_forwardable(&HeaderName::from_static("authorization")));
    assert!(is_forwardable(&HeaderName::from_static("content-type")));
}
