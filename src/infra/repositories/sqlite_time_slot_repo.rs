use crate::domain::{models::time_slot::TimeSlot, ports::TimeSlotRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteTimeSlotRepo { pool: SqlitePool }
impl SqliteTimeSlotRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl TimeSlotRepository for SqliteTimeSlotRepo {
    async fn create(&self, slot: &TimeSlot) -> Result<TimeSlot, AppError> {
        sqlx::query_as::<_, TimeSlot>(
            "INSERT INTO time_slots (id, event_id, start_time, end_time, max_capacity, available_spots, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&slot.id)
            .bind(&slot.event_id)
            .bind(slot.start_time)
            .bind(slot.end_time)
            .bind(slot.max_capacity)
            .bind(slot.available_spots)
            .bind(slot.created_at)
            .bind(slot.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TimeSlot>, AppError> {
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<TimeSlot>, AppError> {
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE event_id = ? ORDER BY start_time ASC")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM time_slots WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn reserve_spot(&self, id: &str) -> Result<bool, AppError> {
        // Single conditional update: the WHERE clause is the capacity check,
        // so two racing callers can never both take the last spot.
        let result = sqlx::query(
            "UPDATE time_slots SET available_spots = available_spots - 1, updated_at = ?
             WHERE id = ? AND available_spots > 0",
        )
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn release_spot(&self, id: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE time_slots SET available_spots = available_spots + 1, updated_at = ?
             WHERE id = ? AND available_spots < max_capacity",
        )
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
