use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::FromRow;

/// A staffing post attached to a time slot. `available_spots` mirrors the
/// time-slot ledger with `required_volunteers` as the cap.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VolunteerShift {
    pub id: String,
    pub time_slot_id: String,
    pub role_type: String,
    pub required_volunteers: i32,
    pub available_spots: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VolunteerShift {
    pub fn new(
        time_slot_id: String,
        role_type: String,
        required_volunteers: i32,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            time_slot_id,
            role_type,
            required_volunteers,
            available_spots: required_volunteers,
            description,
            created_at: Utc::now(),
        }
    }
}

/// Lifecycle: CONFIRMED -> CANCELLED | COMPLETED. Check-in only stamps
/// `checked_in_at`; completion requires a prior check-in.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VolunteerRegistration {
    pub id: String,
    pub volunteer_shift_id: String,
    pub user_id: String,
    pub status: String,
    pub is_team_leader: bool,
    pub notes: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VolunteerRegistration {
    pub fn new(
        volunteer_shift_id: String,
        user_id: String,
        is_team_leader: bool,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            volunteer_shift_id,
            user_id,
            status: "CONFIRMED".to_string(),
            is_team_leader,
            notes,
            checked_in_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A recurring weekly window during which a volunteer can be scheduled.
/// `day_of_week` is ISO: 1 = Monday through 7 = Sunday.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VolunteerAvailability {
    pub id: String,
    pub user_id: String,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl VolunteerAvailability {
    pub fn new(user_id: String, day_of_week: i32, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            day_of_week,
            start_time,
            end_time,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
