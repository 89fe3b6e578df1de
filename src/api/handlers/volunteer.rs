use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{
    CancelRequest, CreateAvailabilityRequest, CreateRegistrationRequest, CreateShiftRequest,
    UpdateAvailabilityRequest,
};
use crate::api::dtos::responses::UserResponse;
use crate::domain::models::volunteer::VolunteerShift;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_shift(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(slot_id): Path<String>,
    Json(payload): Json<CreateShiftRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    if payload.required_volunteers <= 0 {
        return Err(AppError::Validation("Required volunteers must be positive".into()));
    }

    state.time_slot_repo.find_by_id(&slot_id).await?
        .ok_or(AppError::NotFound("Time slot not found".into()))?;

    let shift = VolunteerShift::new(
        slot_id,
        payload.role_type,
        payload.required_volunteers,
        payload.description,
    );
    let created = state.volunteer_repo.create_shift(&shift).await?;

    info!("Volunteer shift {} created", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_shift(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(shift_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let shift = state.volunteer_repo.find_shift_by_id(&shift_id).await?
        .ok_or(AppError::NotFound("Volunteer shift not found".into()))?;
    Ok(Json(shift))
}

pub async fn list_shifts_by_time_slot(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let shifts = state.volunteer_repo.list_shifts_by_time_slot(&slot_id).await?;
    Ok(Json(shifts))
}

pub async fn list_unfilled_shifts(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let shifts = state.volunteer_repo.list_unfilled_shifts().await?;
    Ok(Json(shifts))
}

pub async fn delete_shift(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(shift_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    state.volunteer_repo.find_shift_by_id(&shift_id).await?
        .ok_or(AppError::NotFound("Volunteer shift not found".into()))?;

    let registered = state.volunteer_repo.count_registrations_for_shift(&shift_id).await?;
    if registered > 0 {
        return Err(AppError::Conflict("Shift still has confirmed registrations".into()));
    }

    state.volunteer_repo.delete_shift(&shift_id).await?;

    info!("Volunteer shift {} deleted", shift_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn create_registration(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state.volunteer_service
        .register(
            &payload.volunteer_shift_id,
            &caller.id,
            payload.is_team_leader,
            payload.notes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn list_registrations(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let registrations = state.volunteer_repo.list_registrations().await?;
    Ok(Json(registrations))
}

pub async fn list_my_registrations(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state.volunteer_repo.list_registrations_by_user(&caller.id).await?;
    Ok(Json(registrations))
}

pub async fn cancel_registration(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(registration_id): Path<String>,
    Json(payload): Json<CancelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state.volunteer_repo.find_registration_by_id(&registration_id).await?
        .ok_or(AppError::NotFound("Volunteer registration not found".into()))?;

    if registration.user_id != caller.id && !caller.is_staff() {
        return Err(AppError::Forbidden);
    }

    let cancelled = state.volunteer_service
        .cancel(&registration_id, payload.reason.as_deref())
        .await?;

    info!("Volunteer registration {} cancelled", registration_id);

    Ok(Json(cancelled))
}

pub async fn check_in_registration(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(registration_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let checked_in = state.volunteer_service.check_in(&registration_id).await?;

    info!("Volunteer registration {} checked in", registration_id);

    Ok(Json(checked_in))
}

pub async fn complete_registration(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(registration_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let completed = state.volunteer_service.complete(&registration_id).await?;

    info!("Volunteer registration {} completed", registration_id);

    Ok(Json(completed))
}

pub async fn create_availability(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let availability = state.volunteer_service
        .add_availability(&caller.id, payload.day_of_week, payload.start_time, payload.end_time)
        .await?;

    Ok((StatusCode::CREATED, Json(availability)))
}

pub async fn list_availabilities(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let availabilities = state.volunteer_repo.list_availabilities().await?;
    Ok(Json(availabilities))
}

pub async fn list_my_availabilities(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let availabilities = state.volunteer_repo.list_availabilities_by_user(&caller.id).await?;
    Ok(Json(availabilities))
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(availability_id): Path<String>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut availability = state.volunteer_repo.find_availability_by_id(&availability_id).await?
        .ok_or(AppError::NotFound("Availability not found".into()))?;

    if availability.user_id != caller.id && !caller.is_staff() {
        return Err(AppError::Forbidden);
    }

    if let Some(day_of_week) = payload.day_of_week {
        availability.day_of_week = day_of_week;
    }
    if let Some(start_time) = payload.start_time {
        availability.start_time = start_time;
    }
    if let Some(end_time) = payload.end_time {
        availability.end_time = end_time;
    }
    if let Some(is_active) = payload.is_active {
        availability.is_active = is_active;
    }

    if !(1..=7).contains(&availability.day_of_week) {
        return Err(AppError::Validation("Day of week must be between 1 (Monday) and 7 (Sunday)".into()));
    }
    if availability.start_time >= availability.end_time {
        return Err(AppError::Validation("Start time must be before end time".into()));
    }

    let updated = state.volunteer_repo.update_availability(&availability).await?;
    Ok(Json(updated))
}

pub async fn delete_availability(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(availability_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let availability = state.volunteer_repo.find_availability_by_id(&availability_id).await?
        .ok_or(AppError::NotFound("Availability not found".into()))?;

    if availability.user_id != caller.id && !caller.is_staff() {
        return Err(AppError::Forbidden);
    }

    state.volunteer_repo.delete_availability(&availability_id).await?;

    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Staff view: who could be scheduled for this slot, going by their weekly
/// availability windows.
pub async fn available_volunteers(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let users = state.volunteer_service.available_for_slot(&slot_id).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(users))
}
