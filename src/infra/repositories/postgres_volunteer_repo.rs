use crate::domain::{
    models::user::User,
    models::volunteer::{VolunteerAvailability, VolunteerRegistration, VolunteerShift},
    ports::VolunteerRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use sqlx::PgPool;

pub struct PostgresVolunteerRepo { pool: PgPool }
impl PostgresVolunteerRepo { pub fn new(pool: PgPool) -> Self { Self { pool } } }

#[async_trait]
impl VolunteerRepository for PostgresVolunteerRepo {
    async fn create_shift(&self, shift: &VolunteerShift) -> Result<VolunteerShift, AppError> {
        sqlx::query_as::<_, VolunteerShift>(
            "INSERT INTO volunteer_shifts (id, time_slot_id, role_type, required_volunteers, available_spots, description, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
            .bind(&shift.id)
            .bind(&shift.time_slot_id)
            .bind(&shift.role_type)
            .bind(shift.required_volunteers)
            .bind(shift.available_spots)
            .bind(&shift.description)
            .bind(shift.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_shift_by_id(&self, id: &str) -> Result<Option<VolunteerShift>, AppError> {
        sqlx::query_as::<_, VolunteerShift>("SELECT * FROM volunteer_shifts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_shifts_by_time_slot(&self, time_slot_id: &str) -> Result<Vec<VolunteerShift>, AppError> {
        sqlx::query_as::<_, VolunteerShift>(
            "SELECT * FROM volunteer_shifts WHERE time_slot_id = $1 ORDER BY role_type ASC",
        )
            .bind(time_slot_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_unfilled_shifts(&self) -> Result<Vec<VolunteerShift>, AppError> {
        sqlx::query_as::<_, VolunteerShift>(
            "SELECT * FROM volunteer_shifts WHERE available_spots > 0 ORDER BY created_at ASC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_shift(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM volunteer_shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn reserve_shift_spot(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE volunteer_shifts SET available_spots = available_spots - 1
             WHERE id = $1 AND available_spots > 0",
        )
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn release_shift_spot(&self, id: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE volunteer_shifts SET available_spots = available_spots + 1
             WHERE id = $1 AND available_spots < required_volunteers",
        )
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn create_registration(&self, registration: &VolunteerRegistration) -> Result<VolunteerRegistration, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>(
            "INSERT INTO volunteer_registrations (id, volunteer_shift_id, user_id, status, is_team_leader, notes, checked_in_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
            .bind(&registration.id)
            .bind(&registration.volunteer_shift_id)
            .bind(&registration.user_id)
            .bind(&registration.status)
            .bind(registration.is_team_leader)
            .bind(&registration.notes)
            .bind(registration.checked_in_at)
            .bind(registration.created_at)
            .bind(registration.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_registration_by_id(&self, id: &str) -> Result<Option<VolunteerRegistration>, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>("SELECT * FROM volunteer_registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_registration(&self, user_id: &str, shift_id: &str) -> Result<Option<VolunteerRegistration>, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>(
            "SELECT * FROM volunteer_registrations WHERE user_id = $1 AND volunteer_shift_id = $2",
        )
            .bind(user_id)
            .bind(shift_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_registrations(&self) -> Result<Vec<VolunteerRegistration>, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>(
            "SELECT * FROM volunteer_registrations ORDER BY created_at DESC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_registrations_by_user(&self, user_id: &str) -> Result<Vec<VolunteerRegistration>, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>(
            "SELECT * FROM volunteer_registrations WHERE user_id = $1 ORDER BY created_at DESC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_confirmed_registrations_by_event(&self, event_id: &str) -> Result<Vec<VolunteerRegistration>, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>(
            "SELECT vr.* FROM volunteer_registrations vr
             JOIN volunteer_shifts vs ON vs.id = vr.volunteer_shift_id
             JOIN time_slots ts ON ts.id = vs.time_slot_id
             WHERE ts.event_id = $1 AND vr.status = 'CONFIRMED'",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_registrations_for_shift(&self, shift_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM volunteer_registrations WHERE volunteer_shift_id = $1 AND status = 'CONFIRMED'",
        )
            .bind(shift_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_registration_cancelled(&self, id: &str, reason: Option<&str>) -> Result<Option<VolunteerRegistration>, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>(
            "UPDATE volunteer_registrations SET status = 'CANCELLED', notes = COALESCE($1, notes), updated_at = $2
             WHERE id = $3 AND status = 'CONFIRMED' RETURNING *",
        )
            .bind(reason)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_registration_checked_in(&self, id: &str) -> Result<Option<VolunteerRegistration>, AppError> {
        // Check-in does not change status; completion still requires a
        // CONFIRMED row.
        let now = Utc::now();
        sqlx::query_as::<_, VolunteerRegistration>(
            "UPDATE volunteer_registrations SET checked_in_at = $1, updated_at = $2
             WHERE id = $3 AND status = 'CONFIRMED' RETURNING *",
        )
            .bind(now)
            .bind(now)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_registration_completed(&self, id: &str) -> Result<Option<VolunteerRegistration>, AppError> {
        sqlx::query_as::<_, VolunteerRegistration>(
            "UPDATE volunteer_registrations SET status = 'COMPLETED', updated_at = $1
             WHERE id = $2 AND status = 'CONFIRMED' RETURNING *",
        )
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_availability(&self, availability: &VolunteerAvailability) -> Result<VolunteerAvailability, AppError> {
        sqlx::query_as::<_, VolunteerAvailability>(
            "INSERT INTO volunteer_availabilities (id, user_id, day_of_week, start_time, end_time, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
            .bind(&availability.id)
            .bind(&availability.user_id)
            .bind(availability.day_of_week)
            .bind(availability.start_time)
            .bind(availability.end_time)
            .bind(availability.is_active)
            .bind(availability.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_availability_by_id(&self, id: &str) -> Result<Option<VolunteerAvailability>, AppError> {
        sqlx::query_as::<_, VolunteerAvailability>("SELECT * FROM volunteer_availabilities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_availabilities(&self) -> Result<Vec<VolunteerAvailability>, AppError> {
        sqlx::query_as::<_, VolunteerAvailability>(
            "SELECT * FROM volunteer_availabilities ORDER BY day_of_week ASC, start_time ASC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_availabilities_by_user(&self, user_id: &str) -> Result<Vec<VolunteerAvailability>, AppError> {
        sqlx::query_as::<_, VolunteerAvailability>(
            "SELECT * FROM volunteer_availabilities WHERE user_id = $1 ORDER BY day_of_week ASC, start_time ASC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_availability(&self, availability: &VolunteerAvailability) -> Result<VolunteerAvailability, AppError> {
        sqlx::query_as::<_, VolunteerAvailability>(
            "UPDATE volunteer_availabilities SET day_of_week = $1, start_time = $2, end_time = $3, is_active = $4
             WHERE id = $5 RETURNING *",
        )
            .bind(availability.day_of_week)
            .bind(availability.start_time)
            .bind(availability.end_time)
            .bind(availability.is_active)
            .bind(&availability.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_availability(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM volunteer_availabilities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_available_volunteers(&self, day_of_week: i32, at: NaiveTime) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u
             JOIN volunteer_availabilities va ON va.user_id = u.id
             WHERE va.is_active = TRUE AND va.day_of_week = $1 AND va.start_time <= $2 AND va.end_time >= $2
             GROUP BY u.id",
        )
            .bind(day_of_week)
            .bind(at)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
