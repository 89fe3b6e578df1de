use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateTimeSlotRequest;
use crate::domain::models::time_slot::TimeSlot;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_time_slot(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    if payload.max_capacity <= 0 {
        return Err(AppError::Validation("Capacity must be positive".into()));
    }
    if payload.end_time <= payload.start_time {
        return Err(AppError::Validation("End time must be after start time".into()));
    }

    state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let slot = TimeSlot::new(event_id, payload.start_time, payload.end_time, payload.max_capacity);
    let created = state.time_slot_repo.create(&slot).await?;

    info!("Time slot {} created for event {}", created.id, created.event_id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_time_slots(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slots = state.time_slot_repo.list_by_event(&event_id).await?;
    Ok(Json(slots))
}

pub async fn get_time_slot(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slot = state.time_slot_repo.find_by_id(&slot_id).await?
        .ok_or(AppError::NotFound("Time slot not found".into()))?;
    Ok(Json(slot))
}

pub async fn delete_time_slot(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    state.time_slot_repo.find_by_id(&slot_id).await?
        .ok_or(AppError::NotFound("Time slot not found".into()))?;

    state.time_slot_repo.delete(&slot_id).await?;

    info!("Time slot {} deleted", slot_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
