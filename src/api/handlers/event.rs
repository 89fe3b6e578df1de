use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CancelEventRequest, CreateEventRequest, UpdateEventRequest};
use crate::domain::models::event::Event;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let event = Event::new(
        payload.name,
        payload.description,
        payload.location,
        payload.event_date,
        caller.id,
    );
    let created = state.event_repo.create(&event).await?;

    info!("Event {} created", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(name) = payload.name {
        event.name = name;
    }
    if let Some(description) = payload.description {
        event.description = Some(description);
    }
    if let Some(location) = payload.location {
        event.location = location;
    }
    if let Some(event_date) = payload.event_date {
        event.event_date = event_date;
    }

    let updated = state.event_repo.update(&event).await?;
    Ok(Json(updated))
}

pub async fn publish_event(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.status != "DRAFT" {
        return Err(AppError::Validation("Only draft events can be published".into()));
    }

    let slots = state.time_slot_repo.list_by_event(&event_id).await?;
    if slots.is_empty() {
        return Err(AppError::Validation("Event needs at least one time slot before publishing".into()));
    }

    let published = state.event_repo.set_status(&event_id, "PUBLISHED").await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    info!("Event {} published", event_id);

    Ok(Json(published))
}

pub async fn complete_event(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.status != "PUBLISHED" {
        return Err(AppError::Validation("Only published events can be completed".into()));
    }
    if event.event_date > Utc::now() {
        return Err(AppError::Validation("Event cannot be completed before its date".into()));
    }

    let completed = state.event_repo.set_status(&event_id, "COMPLETED").await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    info!("Event {} completed", event_id);

    Ok(Json(completed))
}

pub async fn cancel_event(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CancelEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    // Completed events stay completed. Cancelling an already-CANCELLED event
    // is allowed so the holder sweep below can be re-run after a partial
    // failure.
    if event.status == "COMPLETED" {
        return Err(AppError::Validation("Completed events cannot be cancelled".into()));
    }

    let cancelled = state.event_repo.set_status(&event_id, "CANCELLED").await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let reservations = state.reservation_repo.list_confirmed_by_event(&event_id).await?;
    for reservation in &reservations {
        if payload.release_spots {
            // Administrative cancel, so go through the repo directly rather
            // than the user-facing service and its slot-start guard. Failures
            // are logged and the sweep continues; the event is already
            // CANCELLED and the endpoint can be re-run for stragglers.
            match state.reservation_repo.mark_cancelled(&reservation.id, Some("Event cancelled")).await {
                Ok(Some(_)) => {
                    if let Err(e) = state.time_slot_repo.release_spot(&reservation.time_slot_id).await {
                        warn!("Failed to release spot for reservation {}: {}", reservation.id, e);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to cancel reservation {}: {}", reservation.id, e),
            }
        }
        state.notification_service
            .send_best_effort(
                &reservation.user_id,
                "RESERVATION_CANCELLATION",
                &format!("The event \"{}\" has been cancelled.", cancelled.name),
            )
            .await;
    }

    let registrations = state.volunteer_repo.list_confirmed_registrations_by_event(&event_id).await?;
    for registration in &registrations {
        if payload.release_spots {
            match state.volunteer_repo.mark_registration_cancelled(&registration.id, Some("Event cancelled")).await {
                Ok(Some(_)) => {
                    if let Err(e) = state.volunteer_repo.release_shift_spot(&registration.volunteer_shift_id).await {
                        warn!("Failed to release shift spot for registration {}: {}", registration.id, e);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to cancel volunteer registration {}: {}", registration.id, e),
            }
        }
        state.notification_service
            .send_best_effort(
                &registration.user_id,
                "VOLUNTEER_CANCELLATION",
                &format!("The event \"{}\" has been cancelled and your shift with it.", cancelled.name),
            )
            .await;
    }

    info!(
        "Event {} cancelled ({} reservations, {} registrations, release_spots={})",
        event_id, reservations.len(), registrations.len(), payload.release_spots
    );

    Ok(Json(cancelled))
}

/// Sends reminder notifications to every confirmed reservation holder and
/// volunteer for the event.
pub async fn send_reminders(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let reservations = state.reservation_repo.list_confirmed_by_event(&event_id).await?;
    for reservation in &reservations {
        state.notification_service
            .send_best_effort(
                &reservation.user_id,
                "RESERVATION_REMINDER",
                &format!("Reminder: your reservation for \"{}\" is coming up.", event.name),
            )
            .await;
    }

    let registrations = state.volunteer_repo.list_confirmed_registrations_by_event(&event_id).await?;
    for registration in &registrations {
        state.notification_service
            .send_best_effort(
                &registration.user_id,
                "VOLUNTEER_REMINDER",
                &format!("Reminder: your volunteer shift for \"{}\" is coming up.", event.name),
            )
            .await;
    }

    info!(
        "Reminders sent for event {}: {} reservations, {} volunteers",
        event_id, reservations.len(), registrations.len()
    );

    Ok(Json(serde_json::json!({
        "reservation_reminders": reservations.len(),
        "volunteer_reminders": registrations.len(),
    })))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    state.event_repo.delete(&event_id).await?;

    info!("Event {} deleted", event_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
