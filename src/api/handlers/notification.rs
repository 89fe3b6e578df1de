use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::{MarkedReadResponse, UnreadCountResponse};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_my_notifications(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let notifications = state.notification_repo.list_by_user(&caller.id).await?;
    Ok(Json(notifications))
}

pub async fn list_my_unread(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let notifications = state.notification_repo.list_unread_by_user(&caller.id).await?;
    Ok(Json(notifications))
}

pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let unread = state.notification_repo.count_unread(&caller.id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(notification_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let notification = state.notification_repo.find_by_id(&notification_id).await?
        .ok_or(AppError::NotFound("Notification not found".into()))?;

    if notification.user_id != caller.id {
        return Err(AppError::Forbidden);
    }

    let updated = state.notification_service.mark_read(&notification_id).await?;
    Ok(Json(updated))
}

pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let marked_read = state.notification_service.mark_all_read(&caller.id).await?;
    Ok(Json(MarkedReadResponse { marked_read }))
}
