use std::sync::Arc;
use crate::domain::{
    models::reservation::{NewReservationParams, Reservation},
    ports::{
        BasketTypeRepository, EventRepository, InventoryRepository,
        ReservationRepository, TimeSlotRepository, UserRepository,
    },
    services::notification_service::NotificationService,
};
use crate::error::AppError;
use chrono::Utc;
use tracing::{info, warn};

pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    time_slots: Arc<dyn TimeSlotRepository>,
    events: Arc<dyn EventRepository>,
    basket_types: Arc<dyn BasketTypeRepository>,
    inventory: Arc<dyn InventoryRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<NotificationService>,
}

impl ReservationService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        time_slots: Arc<dyn TimeSlotRepository>,
        events: Arc<dyn EventRepository>,
        basket_types: Arc<dyn BasketTypeRepository>,
        inventory: Arc<dyn InventoryRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        Self { reservations, time_slots, events, basket_types, inventory, users, notifier }
    }

    pub async fn create(&self, params: NewReservationParams) -> Result<Reservation, AppError> {
        let user = self.users
            .find_by_id(&params.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", params.user_id)))?;

        if user.status != "ACTIVE" {
            return Err(AppError::Validation("Account is not active".to_string()));
        }
        if user.role != "STUDENT" {
            return Err(AppError::Forbidden);
        }
        if !user.student_id_verified {
            return Err(AppError::Validation("Student ID must be verified before reserving".to_string()));
        }

        let slot = self.time_slots
            .find_by_id(&params.time_slot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Time slot {} not found", params.time_slot_id)))?;

        let event = self.events
            .find_by_id(&slot.event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", slot.event_id)))?;

        if event.status != "PUBLISHED" {
            return Err(AppError::Validation("Event is not open for reservations".to_string()));
        }

        self.basket_types
            .find_by_id(&params.basket_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Basket type {} not found", params.basket_type_id)))?;

        if self.reservations
            .find_by_user_and_slot(&params.user_id, &params.time_slot_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("User already has a reservation for this time slot".to_string()));
        }

        // The ledger decrement is the capacity check. Losing the race leaves
        // the row untouched and no reservation is written.
        if !self.time_slots.reserve_spot(&params.time_slot_id).await? {
            return Err(AppError::Validation("Time slot is full".to_string()));
        }

        let reservation = Reservation::new(params);
        let created = match self.reservations.create(&reservation).await {
            Ok(r) => r,
            Err(e) => {
                // Give the spot back; the reservation row never landed.
                if let Err(release_err) = self.time_slots.release_spot(&reservation.time_slot_id).await {
                    warn!("Failed to release spot after reservation insert error: {}", release_err);
                }
                return Err(e);
            }
        };

        info!("Reservation {} created for slot {}", created.id, created.time_slot_id);

        self.notifier
            .send_best_effort(
                &created.user_id,
                "RESERVATION_CONFIRMATION",
                &format!("Your reservation for \"{}\" is confirmed.", event.name),
            )
            .await;

        Ok(created)
    }

    pub async fn cancel(&self, id: &str, reason: Option<&str>) -> Result<Reservation, AppError> {
        let reservation = self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        let slot = self.time_slots
            .find_by_id(&reservation.time_slot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Time slot {} not found", reservation.time_slot_id)))?;

        if slot.start_time <= Utc::now() {
            return Err(AppError::Validation("Reservations cannot be cancelled after the slot has started".to_string()));
        }

        let cancelled = self.reservations
            .mark_cancelled(id, reason)
            .await?
            .ok_or_else(|| AppError::Validation("Only confirmed reservations can be cancelled".to_string()))?;

        self.time_slots.release_spot(&cancelled.time_slot_id).await?;

        self.notifier
            .send_best_effort(
                &cancelled.user_id,
                "RESERVATION_CANCELLATION",
                "Your reservation has been cancelled.",
            )
            .await;

        Ok(cancelled)
    }

    pub async fn check_in(&self, id: &str) -> Result<Reservation, AppError> {
        let checked_in = self.reservations
            .mark_checked_in(id)
            .await?
            .ok_or_else(|| AppError::Validation("Only confirmed reservations can be checked in".to_string()))?;

        let touched = self.inventory
            .decrement_for_basket_type(&checked_in.basket_type_id)
            .await?;
        if touched == 0 {
            warn!(
                "Check-in {} decremented no inventory for basket type {}",
                checked_in.id, checked_in.basket_type_id
            );
        }

        Ok(checked_in)
    }

    pub async fn mark_no_show(&self, id: &str) -> Result<Reservation, AppError> {
        let reservation = self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        let slot = self.time_slots
            .find_by_id(&reservation.time_slot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Time slot {} not found", reservation.time_slot_id)))?;

        // A no-show can only be recorded once the window has closed.
        if slot.end_time > Utc::now() {
            return Err(AppError::Validation("Cannot mark a no-show before the slot has ended".to_string()));
        }

        self.reservations
            .mark_no_show(id)
            .await?
            .ok_or_else(|| AppError::Validation("Only confirmed reservations can be marked as no-show".to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let reservation = self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        if reservation.status == "CHECKED_IN" {
            return Err(AppError::Validation("Checked-in reservations cannot be deleted".to_string()));
        }

        // A hard delete of a live reservation must not leak the spot.
        if reservation.status == "CONFIRMED" {
            self.time_slots.release_spot(&reservation.time_slot_id).await?;
        }

        self.reservations.delete(id).await
    }
}
