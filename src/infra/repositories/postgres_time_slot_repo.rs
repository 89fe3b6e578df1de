use crate::domain::{models::time_slot::TimeSlot, ports::TimeSlotRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresTimeSlotRepo { pool: PgPool }
impl PostgresTimeSlotRepo { pub fn new(pool: PgPool) -> Self { Self { pool } } }

#[async_trait]
impl TimeSlotRepository for PostgresTimeSlotRepo {
    async fn create(&self, slot: &TimeSlot) -> Result<TimeSlot, AppError> {
        sqlx::query_as::<_, TimeSlot>(
            "INSERT INTO time_slots (id, event_id, start_time, end_time, max_capacity, available_spots, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
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
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<TimeSlot>, AppError> {
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE event_id = $1 ORDER BY start_time ASC")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM time_slots WHERE id = $1")
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
            "UPDATE time_slots SET available_spots = available_spots - 1, updated_at = $1
             WHERE id = $2 AND available_spots > 0",
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
            "UPDATE time_slots SET available_spots = available_spots + 1, updated_at = $1
             WHERE id = $2 AND available_spots < max_capacity",
        )
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
