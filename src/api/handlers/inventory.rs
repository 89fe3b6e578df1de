use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateInventoryRequest, StockAdjustmentRequest, UpdateInventoryRequest};
use crate::domain::models::inventory::InventoryItem;
use crate::error::AppError;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i32>,
}

pub async fn create_item(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(payload): Json<CreateInventoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    if payload.quantity < 0 {
        return Err(AppError::Validation("Quantity cannot be negative".into()));
    }

    state.basket_type_repo.find_by_id(&payload.basket_type_id).await?
        .ok_or(AppError::NotFound("Basket type not found".into()))?;

    let item = InventoryItem::new(
        payload.product_name,
        payload.quantity,
        payload.expiration_date,
        payload.basket_type_id,
    );
    let created = state.inventory_repo.create(&item).await?;

    info!("Inventory item {} created", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_items(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let items = state.inventory_repo.list().await?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let item = state.inventory_repo.find_by_id(&item_id).await?
        .ok_or(AppError::NotFound("Inventory item not found".into()))?;
    Ok(Json(item))
}

pub async fn list_low_stock(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Query(query): Query<LowStockQuery>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let items = state.inventory_repo.list_low_stock(query.threshold.unwrap_or(10)).await?;
    Ok(Json(items))
}

pub async fn list_expired(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;
    let items = state.inventory_repo.list_expired(Utc::now().date_naive()).await?;
    Ok(Json(items))
}

pub async fn update_item(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdateInventoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    let mut item = state.inventory_repo.find_by_id(&item_id).await?
        .ok_or(AppError::NotFound("Inventory item not found".into()))?;

    if let Some(product_name) = payload.product_name {
        item.product_name = product_name;
    }
    if let Some(quantity) = payload.quantity {
        if quantity < 0 {
            return Err(AppError::Validation("Quantity cannot be negative".into()));
        }
        item.quantity = quantity;
    }
    if let Some(expiration_date) = payload.expiration_date {
        item.expiration_date = Some(expiration_date);
    }
    if let Some(basket_type_id) = payload.basket_type_id {
        state.basket_type_repo.find_by_id(&basket_type_id).await?
            .ok_or(AppError::NotFound("Basket type not found".into()))?;
        item.basket_type_id = basket_type_id;
    }

    let updated = state.inventory_repo.update(&item).await?;
    Ok(Json(updated))
}

pub async fn add_stock(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(item_id): Path<String>,
    Json(payload): Json<StockAdjustmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    if payload.amount <= 0 {
        return Err(AppError::Validation("Amount must be positive".into()));
    }

    let item = state.inventory_repo.add_stock(&item_id, payload.amount).await?
        .ok_or(AppError::NotFound("Inventory item not found".into()))?;

    info!("Added {} units to inventory item {}", payload.amount, item_id);

    Ok(Json(item))
}

pub async fn remove_stock(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(item_id): Path<String>,
    Json(payload): Json<StockAdjustmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    if payload.amount <= 0 {
        return Err(AppError::Validation("Amount must be positive".into()));
    }

    let item = state.inventory_repo.remove_stock(&item_id, payload.amount).await?
        .ok_or(AppError::NotFound("Inventory item not found".into()))?;

    info!("Removed {} units from inventory item {}", payload.amount, item_id);

    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_staff()?;

    state.inventory_repo.find_by_id(&item_id).await?
        .ok_or(AppError::NotFound("Inventory item not found".into()))?;

    state.inventory_repo.delete(&item_id).await?;

    info!("Inventory item {} deleted", item_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
