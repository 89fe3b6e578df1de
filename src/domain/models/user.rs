use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub status: String,
    pub school: Option<String>,
    pub student_id_verified: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

pub struct NewUserParams {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub school: Option<String>,
}

impl User {
    pub fn new(params: NewUserParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: params.email,
            password_hash: params.password_hash,
            first_name: params.first_name,
            last_name: params.last_name,
            phone: params.phone,
            role: params.role,
            status: "PENDING".to_string(),
            school: params.school,
            student_id_verified: false,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role.as_str(), "ADMIN" | "MANAGER")
    }

    pub fn can_volunteer(&self) -> bool {
        matches!(self.role.as_str(), "VOLUNTEER" | "MANAGER" | "ADMIN")
    }
}
