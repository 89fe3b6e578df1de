use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::UserResponse;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let users = state.user_repo.list().await?;
    let safe: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(safe))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if caller.id != user_id && !caller.is_staff() {
        return Err(AppError::Forbidden);
    }

    let user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn approve_user(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let user = state.user_repo.set_status(&user_id, "ACTIVE").await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    info!("User {} approved", user.id);

    state.notification_service
        .send_best_effort(&user.id, "ACCOUNT_APPROVED", "Your account has been approved. You can now make reservations.")
        .await;

    Ok(Json(UserResponse::from(user)))
}

pub async fn reject_user(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let user = state.user_repo.set_status(&user_id, "REJECTED").await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    info!("User {} rejected", user.id);

    state.notification_service
        .send_best_effort(&user.id, "ACCOUNT_REJECTED", "Your account application has been rejected.")
        .await;

    Ok(Json(UserResponse::from(user)))
}

pub async fn verify_student(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let user = state.user_repo.set_student_verified(&user_id, true).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    info!("Student ID verified for user {}", user.id);

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    if caller.id == user_id {
        return Err(AppError::Conflict("Cannot delete yourself".into()));
    }

    state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    state.user_repo.delete(&user_id).await?;

    info!("Deleted user {}", user_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
