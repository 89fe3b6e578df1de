use crate::domain::models::{
    auth::RefreshTokenRecord, basket_type::BasketType, event::Event,
    inventory::InventoryItem, notification::Notification, reservation::Reservation,
    time_slot::TimeSlot, user::User,
    volunteer::{VolunteerAvailability, VolunteerRegistration, VolunteerShift},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn set_status(&self, id: &str, status: &str) -> Result<Option<User>, AppError>;
    async fn set_student_verified(&self, id: &str, verified: bool) -> Result<Option<User>, AppError>;
    async fn touch_last_login(&self, id: &str) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn set_status(&self, id: &str, status: &str) -> Result<Option<Event>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    async fn create(&self, slot: &TimeSlot) -> Result<TimeSlot, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TimeSlot>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<TimeSlot>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Atomically takes one spot. Returns false when the slot was already
    /// full; the row is untouched in that case.
    async fn reserve_spot(&self, id: &str) -> Result<bool, AppError>;

    /// Atomically gives one spot back, capped at `max_capacity`.
    async fn release_spot(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BasketTypeRepository: Send + Sync {
    async fn create(&self, basket_type: &BasketType) -> Result<BasketType, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<BasketType>, AppError>;
    async fn list(&self) -> Result<Vec<BasketType>, AppError>;
    async fn update(&self, basket_type: &BasketType) -> Result<BasketType, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<InventoryItem>, AppError>;
    async fn list(&self) -> Result<Vec<InventoryItem>, AppError>;
    async fn list_by_basket_type(&self, basket_type_id: &str) -> Result<Vec<InventoryItem>, AppError>;
    async fn list_low_stock(&self, threshold: i32) -> Result<Vec<InventoryItem>, AppError>;
    async fn list_expired(&self, today: NaiveDate) -> Result<Vec<InventoryItem>, AppError>;
    async fn update(&self, item: &InventoryItem) -> Result<InventoryItem, AppError>;
    async fn add_stock(&self, id: &str, amount: i32) -> Result<Option<InventoryItem>, AppError>;
    /// Floor-clamped at zero.
    async fn remove_stock(&self, id: &str, amount: i32) -> Result<Option<InventoryItem>, AppError>;
    /// Subtracts 1 from every item of the basket type that still has stock.
    /// Returns the number of rows touched.
    async fn decrement_for_basket_type(&self, basket_type_id: &str) -> Result<u64, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn find_by_user_and_slot(&self, user_id: &str, time_slot_id: &str) -> Result<Option<Reservation>, AppError>;
    async fn list(&self) -> Result<Vec<Reservation>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError>;
    async fn list_confirmed_by_event(&self, event_id: &str) -> Result<Vec<Reservation>, AppError>;

    /// The mark_* transitions are conditional on the row still being
    /// CONFIRMED; None means the guard did not match.
    async fn mark_cancelled(&self, id: &str, reason: Option<&str>) -> Result<Option<Reservation>, AppError>;
    async fn mark_checked_in(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn mark_no_show(&self, id: &str) -> Result<Option<Reservation>, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<Notification, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Notification>, AppError>;
    async fn list_unread_by_user(&self, user_id: &str) -> Result<Vec<Notification>, AppError>;
    async fn count_unread(&self, user_id: &str) -> Result<i64, AppError>;
    async fn mark_read(&self, id: &str) -> Result<Option<Notification>, AppError>;
    async fn mark_all_read(&self, user_id: &str) -> Result<u64, AppError>;
}

#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    async fn create_shift(&self, shift: &VolunteerShift) -> Result<VolunteerShift, AppError>;
    async fn find_shift_by_id(&self, id: &str) -> Result<Option<VolunteerShift>, AppError>;
    async fn list_shifts_by_time_slot(&self, time_slot_id: &str) -> Result<Vec<VolunteerShift>, AppError>;
    async fn list_unfilled_shifts(&self) -> Result<Vec<VolunteerShift>, AppError>;
    async fn delete_shift(&self, id: &str) -> Result<(), AppError>;
    async fn reserve_shift_spot(&self, id: &str) -> Result<bool, AppError>;
    async fn release_shift_spot(&self, id: &str) -> Result<(), AppError>;

    async fn create_registration(&self, registration: &VolunteerRegistration) -> Result<VolunteerRegistration, AppError>;
    async fn find_registration_by_id(&self, id: &str) -> Result<Option<VolunteerRegistration>, AppError>;
    async fn find_registration(&self, user_id: &str, shift_id: &str) -> Result<Option<VolunteerRegistration>, AppError>;
    async fn list_registrations(&self) -> Result<Vec<VolunteerRegistration>, AppError>;
    async fn list_registrations_by_user(&self, user_id: &str) -> Result<Vec<VolunteerRegistration>, AppError>;
    async fn list_confirmed_registrations_by_event(&self, event_id: &str) -> Result<Vec<VolunteerRegistration>, AppError>;
    async fn count_registrations_for_shift(&self, shift_id: &str) -> Result<i64, AppError>;
    async fn mark_registration_cancelled(&self, id: &str, reason: Option<&str>) -> Result<Option<VolunteerRegistration>, AppError>;
    async fn mark_registration_checked_in(&self, id: &str) -> Result<Option<VolunteerRegistration>, AppError>;
    async fn mark_registration_completed(&self, id: &str) -> Result<Option<VolunteerRegistration>, AppError>;

    async fn create_availability(&self, availability: &VolunteerAvailability) -> Result<VolunteerAvailability, AppError>;
    async fn find_availability_by_id(&self, id: &str) -> Result<Option<VolunteerAvailability>, AppError>;
    async fn list_availabilities(&self) -> Result<Vec<VolunteerAvailability>, AppError>;
    async fn list_availabilities_by_user(&self, user_id: &str) -> Result<Vec<VolunteerAvailability>, AppError>;
    async fn update_availability(&self, availability: &VolunteerAvailability) -> Result<VolunteerAvailability, AppError>;
    async fn delete_availability(&self, id: &str) -> Result<(), AppError>;

    /// Volunteers with an active window on the given ISO weekday covering
    /// the given time of day. One row per user.
    async fn find_available_volunteers(&self, day_of_week: i32, at: NaiveTime) -> Result<Vec<User>, AppError>;
}
