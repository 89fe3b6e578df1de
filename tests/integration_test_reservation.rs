mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{AuthHeaders, TestApp};
use serde_json::json;

async fn setup_published_event(app: &TestApp, staff: &AuthHeaders, capacity: i32) -> (String, String, String) {
    let (status, event) = app.post("/api/v1/events", staff, json!({
        "name": "Weekly Distribution",
        "location": "Campus Hall B",
        "event_date": (Utc::now() + Duration::days(3)).to_rfc3339()
    })).await;
    assert_eq!(status, StatusCode::CREATED);
    let event_id = event["id"].as_str().unwrap().to_string();

    let (status, slot) = app.post(&format!("/api/v1/events/{}/time-slots", event_id), staff, json!({
        "start_time": (Utc::now() + Duration::days(3)).to_rfc3339(),
        "end_time": (Utc::now() + Duration::days(3) + Duration::hours(1)).to_rfc3339(),
        "max_capacity": capacity
    })).await;
    assert_eq!(status, StatusCode::CREATED);
    let slot_id = slot["id"].as_str().unwrap().to_string();

    let (status, basket) = app.post("/api/v1/basket-types", staff, json!({
        "name": "Standard Basket"
    })).await;
    assert_eq!(status, StatusCode::CREATED);
    let basket_id = basket["id"].as_str().unwrap().to_string();

    let (status, _) = app.post(&format!("/api/v1/events/{}/publish", event_id), staff, json!({})).await;
    assert_eq!(status, StatusCode::OK);

    (event_id, slot_id, basket_id)
}

#[tokio::test]
async fn test_reservation_happy_path_decrements_spots() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff, 5).await;

    let (status, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reservation["status"], "CONFIRMED");

    let (_, slot) = app.get(&format!("/api/v1/time-slots/{}", slot_id), &student).await;
    assert_eq!(slot["available_spots"], 4);
}

#[tokio::test]
async fn test_duplicate_reservation_conflicts() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff, 5).await;

    let payload = json!({ "time_slot_id": slot_id, "basket_type_id": basket_id });
    let (status, _) = app.post("/api/v1/reservations", &student, payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/v1/reservations", &student, payload).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The losing attempt must not have burned a spot.
    let (_, slot) = app.get(&format!("/api/v1/time-slots/{}", slot_id), &student).await;
    assert_eq!(slot["available_spots"], 4);
}

#[tokio::test]
async fn test_reservation_on_draft_event_rejected() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (_, event) = app.post("/api/v1/events", &staff, json!({
        "name": "Unpublished",
        "location": "Hall A",
        "event_date": (Utc::now() + Duration::days(1)).to_rfc3339()
    })).await;
    let event_id = event["id"].as_str().unwrap();

    let (_, slot) = app.post(&format!("/api/v1/events/{}/time-slots", event_id), &staff, json!({
        "start_time": Utc::now().to_rfc3339(),
        "end_time": (Utc::now() + Duration::hours(1)).to_rfc3339(),
        "max_capacity": 3
    })).await;

    let (_, basket) = app.post("/api/v1/basket-types", &staff, json!({ "name": "Basic" })).await;

    let (status, _) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot["id"],
        "basket_type_id": basket["id"]
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pending_user_cannot_reserve() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("pending@campus.edu", "password123", "STUDENT", "PENDING").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let pending = app.login("pending@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff, 5).await;

    let (status, _) = app.post("/api/v1/reservations", &pending, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_returns_spot_and_is_terminal() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff, 2).await;

    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    let (status, cancelled) = app.post(
        &format!("/api/v1/reservations/{}/cancel", reservation_id),
        &student,
        json!({ "reason": "Cannot make it" }),
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");

    let (_, slot) = app.get(&format!("/api/v1/time-slots/{}", slot_id), &student).await;
    assert_eq!(slot["available_spots"], 2);

    // Cancelling twice must fail: the row is no longer CONFIRMED.
    let (status, _) = app.post(
        &format!("/api/v1/reservations/{}/cancel", reservation_id),
        &student,
        json!({}),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // And the spot must not have been released twice.
    let (_, slot) = app.get(&format!("/api/v1/time-slots/{}", slot_id), &student).await;
    assert_eq!(slot["available_spots"], 2);
}

#[tokio::test]
async fn test_cannot_cancel_someone_elses_reservation() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("owner@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    app.seed_user("intruder@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let owner = app.login("owner@campus.edu", "password123").await;
    let intruder = app.login("intruder@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff, 5).await;

    let (_, reservation) = app.post("/api/v1/reservations", &owner, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    let (status, _) = app.post(
        &format!("/api/v1/reservations/{}/cancel", reservation_id),
        &intruder,
        json!({}),
    ).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_no_show_rejected_while_slot_still_open() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff, 5).await;

    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    // The slot ends three days out, so a no-show cannot be recorded yet.
    let (status, _) = app.post(
        &format!("/api/v1/reservations/{}/no-show", reservation_id),
        &staff,
        json!({}),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_show_only_from_confirmed() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    // A slot whose window has already closed, so the no-show can land.
    let (_, event) = app.post("/api/v1/events", &staff, json!({
        "name": "Past Distribution",
        "location": "Hall B",
        "event_date": (Utc::now() - Duration::hours(3)).to_rfc3339()
    })).await;
    let event_id = event["id"].as_str().unwrap();

    let (_, slot) = app.post(&format!("/api/v1/events/{}/time-slots", event_id), &staff, json!({
        "start_time": (Utc::now() - Duration::hours(2)).to_rfc3339(),
        "end_time": (Utc::now() - Duration::hours(1)).to_rfc3339(),
        "max_capacity": 5
    })).await;
    let (_, basket) = app.post("/api/v1/basket-types", &staff, json!({ "name": "Basic" })).await;
    app.post(&format!("/api/v1/events/{}/publish", event_id), &staff, json!({})).await;

    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot["id"],
        "basket_type_id": basket["id"]
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    let (status, marked) = app.post(
        &format!("/api/v1/reservations/{}/no-show", reservation_id),
        &staff,
        json!({}),
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["status"], "NO_SHOW");

    // Terminal state: a later check-in attempt is refused.
    let (status, _) = app.post(
        &format!("/api/v1/reservations/{}/check-in", reservation_id),
        &staff,
        json!({}),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unverified_student_cannot_reserve() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "ADMIN", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;

    // Registering through the API leaves the student id unverified.
    let (_, registered) = app.post("/api/v1/auth/register", &staff, json!({
        "email": "fresh@campus.edu",
        "password": "password123",
        "first_name": "Fresh",
        "last_name": "Student"
    })).await;
    let user_id = registered["id"].as_str().unwrap();
    app.post(&format!("/api/v1/users/{}/approve", user_id), &staff, json!({})).await;
    let fresh = app.login("fresh@campus.edu", "password123").await;

    let (_, slot_id, basket_id) = setup_published_event(&app, &staff, 5).await;

    let (status, _) = app.post("/api/v1/reservations", &fresh, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Once verified, the same student can reserve.
    app.post(&format!("/api/v1/users/{}/verify-student", user_id), &staff, json!({})).await;
    let (status, _) = app.post("/api/v1/reservations", &fresh, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket_id
    })).await;
    assert_eq!(status, StatusCode::CREATED);
}
