use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateBasketTypeRequest, UpdateBasketTypeRequest};
use crate::domain::models::basket_type::BasketType;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_basket_type(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateBasketTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let basket_type = BasketType::new(payload.name, payload.description);
    let created = state.basket_type_repo.create(&basket_type).await?;

    info!("Basket type {} created", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_basket_types(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let basket_types = state.basket_type_repo.list().await?;
    Ok(Json(basket_types))
}

pub async fn get_basket_type(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(basket_type_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let basket_type = state.basket_type_repo.find_by_id(&basket_type_id).await?
        .ok_or(AppError::NotFound("Basket type not found".into()))?;
    Ok(Json(basket_type))
}

pub async fn update_basket_type(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(basket_type_id): Path<String>,
    Json(payload): Json<UpdateBasketTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let mut basket_type = state.basket_type_repo.find_by_id(&basket_type_id).await?
        .ok_or(AppError::NotFound("Basket type not found".into()))?;

    if let Some(name) = payload.name {
        basket_type.name = name;
    }
    if let Some(description) = payload.description {
        basket_type.description = Some(description);
    }
    if let Some(is_active) = payload.is_active {
        basket_type.is_active = is_active;
    }

    let updated = state.basket_type_repo.update(&basket_type).await?;
    Ok(Json(updated))
}

pub async fn delete_basket_type(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(basket_type_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    state.basket_type_repo.find_by_id(&basket_type_id).await?
        .ok_or(AppError::NotFound("Basket type not found".into()))?;

    state.basket_type_repo.delete(&basket_type_id).await?;

    info!("Basket type {} deleted", basket_type_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
