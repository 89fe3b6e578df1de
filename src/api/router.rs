use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{
    auth, basket_type, event, health, inventory, notification, reservation,
    time_slot, user, volunteer,
};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Accounts
        .route("/api/v1/users", get(user::list_users))
        .route("/api/v1/users/{user_id}", get(user::get_user).delete(user::delete_user))
        .route("/api/v1/users/{user_id}/approve", post(user::approve_user))
        .route("/api/v1/users/{user_id}/reject", post(user::reject_user))
        .route("/api/v1/users/{user_id}/verify-student", post(user::verify_student))

        // Events & time slots
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{event_id}/publish", post(event::publish_event))
        .route("/api/v1/events/{event_id}/complete", post(event::complete_event))
        .route("/api/v1/events/{event_id}/cancel", post(event::cancel_event))
        .route("/api/v1/events/{event_id}/reminders", post(event::send_reminders))
        .route("/api/v1/events/{event_id}/time-slots", post(time_slot::create_time_slot).get(time_slot::list_time_slots))
        .route("/api/v1/time-slots/{slot_id}", get(time_slot::get_time_slot).delete(time_slot::delete_time_slot))

        // Basket types & inventory
        .route("/api/v1/basket-types", post(basket_type::create_basket_type).get(basket_type::list_basket_types))
        .route("/api/v1/basket-types/{basket_type_id}", get(basket_type::get_basket_type).put(basket_type::update_basket_type).delete(basket_type::delete_basket_type))
        .route("/api/v1/inventory", post(inventory::create_item).get(inventory::list_items))
        .route("/api/v1/inventory/low-stock", get(inventory::list_low_stock))
        .route("/api/v1/inventory/expired", get(inventory::list_expired))
        .route("/api/v1/inventory/{item_id}", get(inventory::get_item).put(inventory::update_item).delete(inventory::delete_item))
        .route("/api/v1/inventory/{item_id}/add-stock", post(inventory::add_stock))
        .route("/api/v1/inventory/{item_id}/remove-stock", post(inventory::remove_stock))

        // Reservations
        .route("/api/v1/reservations", post(reservation::create_reservation).get(reservation::list_reservations))
        .route("/api/v1/reservations/mine", get(reservation::list_my_reservations))
        .route("/api/v1/reservations/{reservation_id}", get(reservation::get_reservation).delete(reservation::delete_reservation))
        .route("/api/v1/reservations/{reservation_id}/cancel", post(reservation::cancel_reservation))
        .route("/api/v1/reservations/{reservation_id}/check-in", post(reservation::check_in_reservation))
        .route("/api/v1/reservations/{reservation_id}/no-show", post(reservation::mark_no_show))

        // Volunteer shifts & registrations
        .route("/api/v1/shifts/unfilled", get(volunteer::list_unfilled_shifts))
        .route("/api/v1/shifts/{shift_id}", get(volunteer::get_shift).delete(volunteer::delete_shift))
        .route("/api/v1/time-slots/{slot_id}/shifts", post(volunteer::create_shift).get(volunteer::list_shifts_by_time_slot))
        .route("/api/v1/volunteer-registrations", post(volunteer::create_registration).get(volunteer::list_registrations))
        .route("/api/v1/volunteer-registrations/mine", get(volunteer::list_my_registrations))
        .route("/api/v1/volunteer-registrations/{registration_id}/cancel", post(volunteer::cancel_registration))
        .route("/api/v1/volunteer-registrations/{registration_id}/check-in", post(volunteer::check_in_registration))
        .route("/api/v1/volunteer-registrations/{registration_id}/complete", post(volunteer::complete_registration))

        // Volunteer availability
        .route("/api/v1/availabilities", post(volunteer::create_availability).get(volunteer::list_availabilities))
        .route("/api/v1/availabilities/mine", get(volunteer::list_my_availabilities))
        .route("/api/v1/availabilities/{availability_id}", put(volunteer::update_availability).delete(volunteer::delete_availability))
        .route("/api/v1/time-slots/{slot_id}/available-volunteers", get(volunteer::available_volunteers))

        // Notifications
        .route("/api/v1/notifications", get(notification::list_my_notifications))
        .route("/api/v1/notifications/unread", get(notification::list_my_unread))
        .route("/api/v1/notifications/unread/count", get(notification::unread_count))
        .route("/api/v1/notifications/{notification_id}/read", post(notification::mark_read))
        .route("/api/v1/notifications/read-all", post(notification::mark_all_read))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
