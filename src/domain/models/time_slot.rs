use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A bookable window within an event. `available_spots` is the capacity
/// ledger: it starts at `max_capacity` and is only ever mutated through the
/// conditional reserve/release updates in the time-slot repository.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TimeSlot {
    pub id: String,
    pub event_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
    pub available_spots: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(
        event_id: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        max_capacity: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            start_time,
            end_time,
            max_capacity,
            available_spots: max_capacity,
            created_at: now,
            updated_at: now,
        }
    }
}
