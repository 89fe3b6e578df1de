use crate::domain::{models::inventory::InventoryItem, ports::InventoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

pub struct SqliteInventoryRepo { pool: SqlitePool }
impl SqliteInventoryRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl InventoryRepository for SqliteInventoryRepo {
    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            "INSERT INTO inventory (id, product_name, quantity, expiration_date, basket_type_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&item.id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.expiration_date)
            .bind(&item.basket_type_id)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory ORDER BY product_name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_basket_type(&self, basket_type_id: &str) -> Result<Vec<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory WHERE basket_type_id = ? ORDER BY product_name ASC",
        )
            .bind(basket_type_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_low_stock(&self, threshold: i32) -> Result<Vec<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory WHERE quantity <= ? ORDER BY quantity ASC",
        )
            .bind(threshold)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_expired(&self, today: NaiveDate) -> Result<Vec<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory WHERE expiration_date IS NOT NULL AND expiration_date < ? ORDER BY expiration_date ASC",
        )
            .bind(today)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, item: &InventoryItem) -> Result<InventoryItem, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory SET product_name = ?, quantity = ?, expiration_date = ?, basket_type_id = ?, updated_at = ?
             WHERE id = ? RETURNING *",
        )
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.expiration_date)
            .bind(&item.basket_type_id)
            .bind(Utc::now())
            .bind(&item.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn add_stock(&self, id: &str, amount: i32) -> Result<Option<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory SET quantity = quantity + ?, updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(amount)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn remove_stock(&self, id: &str, amount: i32) -> Result<Option<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory SET quantity = MAX(0, quantity - ?), updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(amount)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn decrement_for_basket_type(&self, basket_type_id: &str) -> Result<u64, AppError> {
        // Items already at zero are skipped rather than clamped, so the
        // quantity CHECK never trips.
        let result = sqlx::query(
            "UPDATE inventory SET quantity = quantity - 1, updated_at = ?
             WHERE basket_type_id = ? AND quantity > 0",
        )
            .bind(Utc::now())
            .bind(basket_type_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM inventory WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
