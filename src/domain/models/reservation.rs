use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Lifecycle: CONFIRMED -> CANCELLED | CHECKED_IN | NO_SHOW, all terminal.
/// Transitions are enforced by conditional updates in the repository, never
/// by read-then-write.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
    pub id: String,
    pub user_id: String,
    pub time_slot_id: String,
    pub basket_type_id: String,
    pub status: String,
    pub notes: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewReservationParams {
    pub user_id: String,
    pub time_slot_id: String,
    pub basket_type_id: String,
    pub notes: Option<String>,
}

impl Reservation {
    pub fn new(params: NewReservationParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            time_slot_id: params.time_slot_id,
            basket_type_id: params.basket_type_id,
            status: "CONFIRMED".to_string(),
            notes: params.notes,
            checked_in_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
