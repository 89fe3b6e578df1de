use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    /// STUDENT or VOLUNTEER; staff roles are assigned out of band.
    pub role: Option<String>,
    pub school: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub event_date: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct CancelEventRequest {
    /// When true, confirmed reservations are cancelled and their spots
    /// returned. Default keeps reservations and only notifies holders.
    #[serde(default)]
    pub release_spots: bool,
}

#[derive(Deserialize)]
pub struct CreateTimeSlotRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
}

#[derive(Deserialize)]
pub struct CreateBasketTypeRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBasketTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateInventoryRequest {
    pub product_name: String,
    pub quantity: i32,
    pub expiration_date: Option<NaiveDate>,
    pub basket_type_id: String,
}

#[derive(Deserialize)]
pub struct UpdateInventoryRequest {
    pub product_name: Option<String>,
    pub quantity: Option<i32>,
    pub expiration_date: Option<NaiveDate>,
    pub basket_type_id: Option<String>,
}

#[derive(Deserialize)]
pub struct StockAdjustmentRequest {
    pub amount: i32,
}

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub time_slot_id: String,
    pub basket_type_id: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateShiftRequest {
    pub role_type: String,
    pub required_volunteers: i32,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRegistrationRequest {
    pub volunteer_shift_id: String,
    #[serde(default)]
    pub is_team_leader: bool,
    pub notes: Option<String>,
}

/// Weekly window; `day_of_week` is ISO, 1 = Monday through 7 = Sunday.
#[derive(Deserialize)]
pub struct CreateAvailabilityRequest {
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub day_of_week: Option<i32>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_active: Option<bool>,
}
