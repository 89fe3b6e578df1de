use std::sync::Arc;
use crate::domain::{
    models::{user::User, volunteer::{VolunteerAvailability, VolunteerRegistration}},
    ports::{TimeSlotRepository, UserRepository, VolunteerRepository},
    services::notification_service::NotificationService,
};
use crate::error::AppError;
use chrono::{Datelike, NaiveTime, Utc};
use tracing::{info, warn};

pub struct VolunteerService {
    volunteers: Arc<dyn VolunteerRepository>,
    time_slots: Arc<dyn TimeSlotRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<NotificationService>,
}

impl VolunteerService {
    pub fn new(
        volunteers: Arc<dyn VolunteerRepository>,
        time_slots: Arc<dyn TimeSlotRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        Self { volunteers, time_slots, users, notifier }
    }

    pub async fn register(
        &self,
        shift_id: &str,
        user_id: &str,
        is_team_leader: bool,
        notes: Option<String>,
    ) -> Result<VolunteerRegistration, AppError> {
        let user = self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if user.status != "ACTIVE" {
            return Err(AppError::Validation("Account is not active".to_string()));
        }
        if !user.can_volunteer() {
            return Err(AppError::Forbidden);
        }

        let shift = self.volunteers
            .find_shift_by_id(shift_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Volunteer shift {} not found", shift_id)))?;

        if self.volunteers.find_registration(user_id, shift_id).await?.is_some() {
            return Err(AppError::Conflict("User is already registered for this shift".to_string()));
        }

        if !self.volunteers.reserve_shift_spot(shift_id).await? {
            return Err(AppError::Validation("Volunteer shift is fully staffed".to_string()));
        }

        let registration = VolunteerRegistration::new(
            shift_id.to_string(),
            user_id.to_string(),
            is_team_leader,
            notes,
        );
        let created = match self.volunteers.create_registration(&registration).await {
            Ok(r) => r,
            Err(e) => {
                if let Err(release_err) = self.volunteers.release_shift_spot(shift_id).await {
                    warn!("Failed to release shift spot after registration insert error: {}", release_err);
                }
                return Err(e);
            }
        };

        info!("Volunteer registration {} created for shift {}", created.id, shift_id);

        self.notifier
            .send_best_effort(
                user_id,
                "VOLUNTEER_CONFIRMATION",
                &format!("You are signed up as {} for this shift.", shift.role_type),
            )
            .await;

        Ok(created)
    }

    pub async fn cancel(&self, id: &str, reason: Option<&str>) -> Result<VolunteerRegistration, AppError> {
        let registration = self.volunteers
            .find_registration_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Volunteer registration {} not found", id)))?;

        let shift = self.volunteers
            .find_shift_by_id(&registration.volunteer_shift_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Volunteer shift {} not found", registration.volunteer_shift_id)))?;

        let slot = self.time_slots
            .find_by_id(&shift.time_slot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Time slot {} not found", shift.time_slot_id)))?;

        if slot.start_time <= Utc::now() {
            return Err(AppError::Validation("Registrations cannot be cancelled after the shift has started".to_string()));
        }

        let cancelled = self.volunteers
            .mark_registration_cancelled(id, reason)
            .await?
            .ok_or_else(|| AppError::Validation("Only confirmed registrations can be cancelled".to_string()))?;

        self.volunteers.release_shift_spot(&cancelled.volunteer_shift_id).await?;

        Ok(cancelled)
    }

    pub async fn check_in(&self, id: &str) -> Result<VolunteerRegistration, AppError> {
        self.volunteers
            .mark_registration_checked_in(id)
            .await?
            .ok_or_else(|| AppError::Validation("Only confirmed registrations can be checked in".to_string()))
    }

    pub async fn complete(&self, id: &str) -> Result<VolunteerRegistration, AppError> {
        let registration = self.volunteers
            .find_registration_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Volunteer registration {} not found", id)))?;

        if registration.checked_in_at.is_none() {
            return Err(AppError::Validation("Registration must be checked in before completion".to_string()));
        }

        self.volunteers
            .mark_registration_completed(id)
            .await?
            .ok_or_else(|| AppError::Validation("Only confirmed registrations can be completed".to_string()))
    }

    pub async fn add_availability(
        &self,
        user_id: &str,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<VolunteerAvailability, AppError> {
        let user = self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if !user.can_volunteer() {
            return Err(AppError::Validation("Only volunteers and staff can declare availability".to_string()));
        }
        if !(1..=7).contains(&day_of_week) {
            return Err(AppError::Validation("Day of week must be between 1 (Monday) and 7 (Sunday)".to_string()));
        }
        if start_time >= end_time {
            return Err(AppError::Validation("Start time must be before end time".to_string()));
        }

        let availability = VolunteerAvailability::new(user_id.to_string(), day_of_week, start_time, end_time);
        self.volunteers.create_availability(&availability).await
    }

    /// Volunteers whose weekly window covers the start of the given slot.
    pub async fn available_for_slot(&self, slot_id: &str) -> Result<Vec<User>, AppError> {
        let slot = self.time_slots
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Time slot {} not found", slot_id)))?;

        let day_of_week = slot.start_time.weekday().number_from_monday() as i32;
        let at = slot.start_time.time();

        self.volunteers.find_available_volunteers(day_of_week, at).await
    }
}
