use crate::domain::{models::reservation::Reservation, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteReservationRepo { pool: SqlitePool }
impl SqliteReservationRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl ReservationRepository for SqliteReservationRepo {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (id, user_id, time_slot_id, basket_type_id, status, notes, checked_in_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&reservation.id)
            .bind(&reservation.user_id)
            .bind(&reservation.time_slot_id)
            .bind(&reservation.basket_type_id)
            .bind(&reservation.status)
            .bind(&reservation.notes)
            .bind(reservation.checked_in_at)
            .bind(reservation.created_at)
            .bind(reservation.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_and_slot(&self, user_id: &str, time_slot_id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = ? AND time_slot_id = ?",
        )
            .bind(user_id)
            .bind(time_slot_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = ? ORDER BY created_at DESC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_confirmed_by_event(&self, event_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT r.* FROM reservations r
             JOIN time_slots ts ON ts.id = r.time_slot_id
             WHERE ts.event_id = ? AND r.status = 'CONFIRMED'",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_cancelled(&self, id: &str, reason: Option<&str>) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'CANCELLED', notes = COALESCE(?, notes), updated_at = ?
             WHERE id = ? AND status = 'CONFIRMED' RETURNING *",
        )
            .bind(reason)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_checked_in(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'CHECKED_IN', checked_in_at = ?, updated_at = ?
             WHERE id = ? AND status = 'CONFIRMED' RETURNING *",
        )
            .bind(now)
            .bind(now)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_no_show(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'NO_SHOW', updated_at = ?
             WHERE id = ? AND status = 'CONFIRMED' RETURNING *",
        )
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
