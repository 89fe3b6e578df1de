mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_creates_pending_user() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "alice@campus.edu",
                "password": "hunter2hunter2",
                "first_name": "Alice",
                "last_name": "Martin",
                "school": "ENS"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["role"], "STUDENT");
    assert_eq!(body["student_id_verified"], false);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.seed_user("bob@campus.edu", "secret-password", "STUDENT", "ACTIVE").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "bob@campus.edu",
                "password": "other-password",
                "first_name": "Bob",
                "last_name": "Duplicate"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_staff_roles() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "sneaky@campus.edu",
                "password": "password123",
                "first_name": "Sneaky",
                "last_name": "Admin",
                "role": "ADMIN"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = TestApp::new().await;
    app.seed_user("carol@campus.edu", "correct-password", "STUDENT", "ACTIVE").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "carol@campus.edu",
                "password": "wrong-password"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_user_cannot_login() {
    let app = TestApp::new().await;
    app.seed_user("denied@campus.edu", "password123", "STUDENT", "REJECTED").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "denied@campus.edu",
                "password": "password123"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mutating_request_without_csrf_forbidden() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "ADMIN", "ACTIVE").await;
    let auth = app.login("staff@pantry.org", "password123").await;

    // POST carrying the cookie but not the CSRF header must be refused.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/basket-types")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::from(json!({ "name": "Standard" }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = TestApp::new().await;
    app.seed_user("dora@campus.edu", "password123", "STUDENT", "ACTIVE").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "dora@campus.edu",
                "password": "password123"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let refresh_cookie = res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .find(|c| c.contains("refresh_token="))
        .expect("No refresh_token cookie returned");
    let start = refresh_cookie.find("refresh_token=").unwrap() + 14;
    let end = refresh_cookie[start..].find(';').unwrap_or(refresh_cookie.len() - start);
    let refresh_token = refresh_cookie[start..start + end].to_string();

    let refresh_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(refresh_res.status(), StatusCode::OK);

    // The old refresh token is consumed; replaying it must fail.
    let replay_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(replay_res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejection_after_login_revokes_refresh_family() {
    let app = TestApp::new().await;
    app.seed_user("admin@pantry.org", "password123", "ADMIN", "ACTIVE").await;
    let user = app.seed_user("evan@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("admin@pantry.org", "password123").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "evan@campus.edu",
                "password": "password123"
            }).to_string())).unwrap()
    ).await.unwrap();
    let refresh_cookie = res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .find(|c| c.contains("refresh_token="))
        .expect("No refresh_token cookie returned");
    let start = refresh_cookie.find("refresh_token=").unwrap() + 14;
    let end = refresh_cookie[start..].find(';').unwrap_or(refresh_cookie.len() - start);
    let refresh_token = refresh_cookie[start..start + end].to_string();

    app.post(&format!("/api/v1/users/{}/reject", user.id), &staff, json!({})).await;

    let refresh_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(refresh_res.status(), StatusCode::UNAUTHORIZED);

    // The whole token family was revoked, so reinstating the account does
    // not revive the old token.
    app.post(&format!("/api/v1/users/{}/approve", user.id), &staff, json!({})).await;
    let retry_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(retry_res.status(), StatusCode::UNAUTHORIZED);
}
