mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{AuthHeaders, TestApp};
use serde_json::json;

async fn setup_event_with_slot(
    app: &TestApp,
    staff: &AuthHeaders,
    event_date: chrono::DateTime<Utc>,
) -> (String, String) {
    let (_, event) = app.post("/api/v1/events", staff, json!({
        "name": "Distribution",
        "location": "Hall A",
        "event_date": event_date.to_rfc3339()
    })).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let (_, slot) = app.post(&format!("/api/v1/events/{}/time-slots", event_id), staff, json!({
        "start_time": event_date.to_rfc3339(),
        "end_time": (event_date + Duration::hours(1)).to_rfc3339(),
        "max_capacity": 5
    })).await;

    (event_id, slot["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_complete_waits_for_event_date() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;

    let (future_event, _) = setup_event_with_slot(&app, &staff, Utc::now() + Duration::days(1)).await;
    app.post(&format!("/api/v1/events/{}/publish", future_event), &staff, json!({})).await;

    let (status, _) = app.post(&format!("/api/v1/events/{}/complete", future_event), &staff, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (past_event, _) = setup_event_with_slot(&app, &staff, Utc::now() - Duration::hours(1)).await;
    app.post(&format!("/api/v1/events/{}/publish", past_event), &staff, json!({})).await;

    let (status, completed) = app.post(&format!("/api/v1/events/{}/complete", past_event), &staff, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["status"], "COMPLETED");
}

#[tokio::test]
async fn test_completed_event_cannot_be_cancelled() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;

    let (event_id, _) = setup_event_with_slot(&app, &staff, Utc::now() - Duration::hours(1)).await;
    app.post(&format!("/api/v1/events/{}/publish", event_id), &staff, json!({})).await;
    app.post(&format!("/api/v1/events/{}/complete", event_id), &staff, json!({})).await;

    let (status, _) = app.post(&format!("/api/v1/events/{}/cancel", event_id), &staff, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_sweep_can_be_rerun() {
    let app = TestApp::new().await;
    app.seed_user("staff@pantry.org", "password123", "MANAGER", "ACTIVE").await;
    app.seed_user("student@campus.edu", "password123", "STUDENT", "ACTIVE").await;
    let staff = app.login("staff@pantry.org", "password123").await;
    let student = app.login("student@campus.edu", "password123").await;

    let (event_id, slot_id) = setup_event_with_slot(&app, &staff, Utc::now() + Duration::days(1)).await;
    let (_, basket) = app.post("/api/v1/basket-types", &staff, json!({ "name": "Standard" })).await;
    app.post(&format!("/api/v1/events/{}/publish", event_id), &staff, json!({})).await;

    let (_, reservation) = app.post("/api/v1/reservations", &student, json!({
        "time_slot_id": slot_id,
        "basket_type_id": basket["id"].as_str().unwrap()
    })).await;
    let reservation_id = reservation["id"].as_str().unwrap();

    let (status, _) = app.post(&format!("/api/v1/events/{}/cancel", event_id), &staff, json!({
        "release_spots": true
    })).await;
    assert_eq!(status, StatusCode::OK);

    // Running the sweep a second time is accepted and does not release the
    // same spot twice.
    let (status, cancelled) = app.post(&format!("/api/v1/events/{}/cancel", event_id), &staff, json!({
        "release_spots": true
    })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");

    let (_, reservation) = app.get(&format!("/api/v1/reservations/{}", reservation_id), &student).await;
    assert_eq!(reservation["status"], "CANCELLED");

    let (_, slot) = app.get(&format!("/api/v1/time-slots/{}", slot_id), &student).await;
    assert_eq!(slot["available_spots"], 5);
}
