use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CancelRequest, CreateReservationRequest};
use crate::domain::models::reservation::NewReservationParams;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_service
        .create(NewReservationParams {
            user_id: caller.id,
            time_slot_id: payload.time_slot_id,
            basket_type_id: payload.basket_type_id,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let reservations = state.reservation_repo.list().await?;
    Ok(Json(reservations))
}

pub async fn list_my_reservations(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservation_repo.list_by_user(&caller.id).await?;
    Ok(Json(reservations))
}

pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    if reservation.user_id != caller.id && !caller.is_staff() {
        return Err(AppError::Forbidden);
    }

    Ok(Json(reservation))
}

pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(reservation_id): Path<String>,
    Json(payload): Json<CancelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    if reservation.user_id != caller.id && !caller.is_staff() {
        return Err(AppError::Forbidden);
    }

    let cancelled = state.reservation_service
        .cancel(&reservation_id, payload.reason.as_deref())
        .await?;

    info!("Reservation {} cancelled", reservation_id);

    Ok(Json(cancelled))
}

pub async fn check_in_reservation(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let checked_in = state.reservation_service.check_in(&reservation_id).await?;

    info!("Reservation {} checked in", reservation_id);

    Ok(Json(checked_in))
}

pub async fn mark_no_show(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let marked = state.reservation_service.mark_no_show(&reservation_id).await?;

    info!("Reservation {} marked as no-show", reservation_id);

    Ok(Json(marked))
}

pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    state.reservation_service.delete(&reservation_id).await?;

    info!("Reservation {} deleted", reservation_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
