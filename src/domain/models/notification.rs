use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// In-app message. No delivery channel exists: a notification is "sent" the
/// moment the row is persisted, and the only later mutation is read-marking.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub status: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(user_id: String, kind: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            kind,
            status: "SENT".to_string(),
            content,
            sent_at: Utc::now(),
            read_at: None,
        }
    }
}
