mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{AuthHeaders, TestApp};
use serde_json::json;

async fn setup_published_event(app: &TestApp, staff: &AuthHeaders) -> (String, String, String) {
    let (_, event) = app.post("/api/v1/events", staff, json!({
        "name": "Spring Distribution",
        "location": "Hall A",
        "event_date": (Utc::now() + Duration::days(1)).to_rfc3339()
    })).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let (_, slot) = app.post(&format!("/api/v1/events/{}/time-slots", event_id), staff, json!({
        "start_time": (Utc::now() + Duration::days(1)).to_rfc3339(),
        "end_time": (Utc::now() + Duration::days(1) + Duration::hours(1)).to_rfc3339(),
        "max_capacity": 5
    })).await;
    let slot_id = slot["id"].as_str().unwrap().to_string();

    let (_, basket) = app.post("/api/v1/basket-types", staff, json!({ "name": "Standard" })).await;
    let basket_id = basket["id"].as_str().unwrap().to_string();

    app.post(&format!("/api/v1/events/{}/publish", event_id), staff, json!({})).await;

    (event_id, slot_id, basket_id)
}

#[tokio::test]
async fn test_reservation_lifecycle_produces_notifications() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff).await;

    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    let (_, notifications) = app.get("/api/v1/notifications", &student).await;
    let kinds: Vec<&str> = notifications.as_array().unwrap().iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"RESERVATION_CONFIRMATION"));

    app.post(&format!("/api/v1/reservations/{}/cancel", reservation_id), &student, json!({})).await;

    let (_, notifications) = app.get("/api/v1/notifications", &student).await;
    let kinds: Vec<&str> = notifications.as_array().unwrap().iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"RESERVATION_CANCELLATION"));
}

#[tokio::test]
async fn test_mark_read_and_read_all() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff).await;
    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    app.post(&format!("/api/v1/reservations/{}/cancel", reservation["id"].as_str().unwrap()), &student, json!({})).await;

    let (_, count) = app.get("/api/v1/notifications/unread/count", &student).await;
    assert_eq!(count["unread"], 2);

    let (_, unread) = app.get("/api/v1/notifications/unread", &student).await;
    let first_id = unread[0]["id"].as_str().unwrap().to_string();

    let (status, marked) = app.post(&format!("/api/v1/notifications/{}/read", first_id), &student, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["status"], "READ");
    assert!(!marked["read_at"].is_null());

    let (_, count) = app.get("/api/v1/notifications/unread/count", &student).await;
    assert_eq!(count["unread"], 1);

    let (status, result) = app.post("/api/v1/notifications/read-all", &student, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["marked_read"], 1);

    let (_, count) = app.get("/api/v1/notifications/unread/count", &student).await;
    assert_eq!(count["unread"], 0);
}

#[tokio::test]
async fn test_cannot_read_someone_elses_notification() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("owner@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    app.seed_user("other@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let owner = app.login("owner@campus.edu", "password123").await;
    let other = app.login("other@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff).await;
    app.post("/api/v1/reservations", &owner, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;

    let (_, notifications) = app.get("/api/v1/notifications", &owner).await;
    let notification_id = notifications[0]["id"].as_str().unwrap();

    let (status, _) = app.post(&format!("/api/v1/notifications/{}/read", notification_id), &other, json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_account_approval_notifies_user() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "ADMIN", "ACTIVE").await;
    let pending = app.seed_user("newbie@campus.edu", "password123", "STUDENT", "PENDING").await;
    let staff = app.login("staff@pantry.org", "password123").await;

    let (status, approved) = app.post(&format!("/api/v1/users/{}/approve", pending.id), &staff, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "ACTIVE");

    let newbie = app.login("newbie@campus.edu", "password123").await;
    let (_, notifications) = app.get("/api/v1/notifications", &newbie).await;
    assert_eq!(notifications[0]["kind"], "ACCOUNT_APPROVED");
}

#[tokio::test]
async fn test_event_cancel_notify_only_keeps_reservations() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (event_id, slot_id, basket_id) = setup_published_event(&app, &staff).await;
    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    let (status, cancelled) = app.post(&format!("/api/v1/events/{}/cancel", event_id), &staff, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");

    // Default mode keeps the reservation but tells the holder.
    let (_, reservation) = app.get(&format!("/api/v1/reservations/{}", reservation_id), &student).await;
    assert_eq!(reservation["status"], "CONFIRMED");

    let (_, notifications) = app.get("/api/v1/notifications", &student).await;
    let kinds: Vec<&str> = notifications.as_array().unwrap().iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"RESERVATION_CANCELLATION"));
}

#[tokio::test]
async fn test_event_cancel_with_release_frees_spots() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    app.seed_user("helper@campus.edu", "password123", "VOLUNTEER", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;
    let helper = app.login("helper@campus.edu", "password123").await;

    let (event_id, slot_id, basket_id) = setup_published_event(&app, &staff).await;
    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    let (_, shift) = app.post(&format!("/api/v1/time-slots/{}/shifts", slot_id), &staff, json!({
        "role_type": "DISTRIBUTION",
        "required_volunteers": 1
    })).await;
    let shift_id = shift["id"].as_str().unwrap();
    app.post("/api/v1/volunteer-registrations", &helper, json!({
        "volunteer_shift_id": shift_id
    })).await;

    let (status, _) = app.post(&format!("/api/v1/events/{}/cancel", event_id), &staff, json!({
        "release_spots": true
    })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, reservation) = app.get(&format!("/api/v1/reservations/{}", reservation_id), &student).await;
    assert_eq!(reservation["status"], "CANCELLED");

    let (_, slot) = app.get(&format!("/api/v1/time-slots/{}", slot_id), &student).await;
    assert_eq!(slot["available_spots"], 5);

    // The shift spot comes back too, and volunteers get their own
    // notification kind.
    let (_, shift) = app.get(&format!("/api/v1/shifts/{}", shift_id), &helper).await;
    assert_eq!(shift["available_spots"], 1);

    let (_, notifications) = app.get("/api/v1/notifications", &helper).await;
    let kinds: Vec<&str> = notifications.as_array().unwrap().iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"VOLUNTEER_CANCELLATION"));
}

#[tokio::test]
async fn test_reminders_reach_confirmed_holders() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (event_id, slot_id, basket_id) = setup_published_event(&app, &staff).await;
    app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;

    let (status, summary) = app.post(&format!("/api/v1/events/{}/reminders", event_id), &staff, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["reservation_reminders"], 1);
    assert_eq!(summary["volunteer_reminders"], 0);

    let (_, notifications) = app.get("/api/v1/notifications", &student).await;
    let kinds: Vec<&str> = notifications.as_array().unwrap().iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"RESERVATION_REMINDER"));
}
