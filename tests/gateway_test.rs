//! End-to-end tests for the HTTP gateway, run entirely against the
//! in-memory blob store.

mod helpers;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::{Request, StatusCode};
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn upload_and_fetch_roundtrip() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    let (status, body) = app
        .upload(&token, "report.pdf", "2024-06-01T12:00:00Z", b"hello depot")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "ok");
    let id = body["id"].as_str().expect("id").to_string();
    assert!(!id.is_empty());

    let (status, body) = app.get(&token, &format!("/files/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file"]["name"], "report.pdf");
    assert_eq!(body["file"]["created_at_valid"], true);
    let content = BASE64
        .decode(body["file"]["content"].as_str().expect("content"))
        .expect("base64");
    assert_eq!(content, b"hello depot");
}

#[tokio::test]
async fn upload_without_token_is_unauthorized() {
    let app = TestApp::new();
    let body = helpers::multipart_body("report.pdf", "2024-06-01T12:00:00Z", b"x");
    let request = Request::builder()
        .method("POST")
        .uri("/files/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", helpers::BOUNDARY),
        )
        .body(axum::body::Body::from(body))
        .expect("request");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
    assert!(!body["error"].as_str().unwrap_or("").is_empty());
}

#[tokio::test]
async fn upload_rejects_malformed_timestamp() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    let (status, body) = app.upload(&token, "report.pdf", "yesterday", b"x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn fetch_is_restricted_to_the_owner() {
    let app = TestApp::new();
    let owner = app.token_for(Uuid::new_v4());
    let stranger = app.token_for(Uuid::new_v4());

    let (_, body) = app
        .upload(&owner, "secret.txt", "2024-06-01T12:00:00Z", b"mine")
        .await;
    let id = body["id"].as_str().expect("id").to_string();

    let (status, body) = app.get(&stranger, &format!("/files/{id}")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);
}

#[tokio::test]
async fn fetch_unknown_id_is_not_found() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    let (status, body) = app
        .get(&token, &format!("/files/{}", Uuid::new_v4()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn fetch_rejects_short_id() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    let (status, _) = app.get(&token, "/files/ab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_below_limit_is_not_found() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    for _ in 0..3 {
        let (status, _) = app
            .upload(&token, "quarterly", "2024-06-01T12:00:00Z", b"q")
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.get(&token, "/files?name=quarterly").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn list_at_limit_returns_all_matches() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    for _ in 0..10 {
        let (status, _) = app
            .upload(&token, "decade", "2024-06-01T12:00:00Z", b"d")
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.get(&token, "/files?name=decade").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"].as_array().expect("files").len(), 10);
}

#[tokio::test]
async fn list_requires_exactly_one_filter() {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    let (status, _) = app.get(&token, "/files").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get(&token, "/files?name=abc&owner=def").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_short_password() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/users/login",
            serde_json::json!({"email": "a@b.c", "password": "xy"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(!body["error"].as_str().unwrap_or("").is_empty());
}

#[tokio::test]
async fn register_rejects_short_email() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/users/register",
            serde_json::json!({"email": "ab", "password": "secret"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn health_reports_store_type() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(axum::body::Body::empty())
        .expect("request");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}
