use crate::domain::{models::basket_type::BasketType, ports::BasketTypeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBasketTypeRepo { pool: SqlitePool }
impl SqliteBasketTypeRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl BasketTypeRepository for SqliteBasketTypeRepo {
    async fn create(&self, basket_type: &BasketType) -> Result<BasketType, AppError> {
        sqlx::query_as::<_, BasketType>(
            "INSERT INTO basket_types (id, name, description, is_active, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&basket_type.id)
            .bind(&basket_type.name)
            .bind(&basket_type.description)
            .bind(basket_type.is_active)
            .bind(basket_type.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BasketType>, AppError> {
        sqlx::query_as::<_, BasketType>("SELECT * FROM basket_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<BasketType>, AppError> {
        sqlx::query_as::<_, BasketType>("SELECT * FROM basket_types ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, basket_type: &BasketType) -> Result<BasketType, AppError> {
        sqlx::query_as::<_, BasketType>(
            "UPDATE basket_types SET name = ?, description = ?, is_active = ? WHERE id = ? RETURNING *",
        )
            .bind(&basket_type.name)
            .bind(&basket_type.description)
            .bind(basket_type.is_active)
            .bind(&basket_type.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM basket_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
