use std::sync::Arc;
use crate::domain::{
    models::notification::Notification,
    ports::{NotificationRepository, UserRepository},
};
use crate::error::AppError;
use tracing::warn;

pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { notifications, users }
    }

    /// Persists an in-app notification for the user. Delivery is the insert
    /// itself; there is no outbound channel.
    pub async fn send(&self, user_id: &str, kind: &str, content: &str) -> Result<Notification, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let notification = Notification::new(
            user_id.to_string(),
            kind.to_string(),
            content.to_string(),
        );
        self.notifications.create(&notification).await
    }

    /// Notification failures never abort the operation that triggered them.
    pub async fn send_best_effort(&self, user_id: &str, kind: &str, content: &str) {
        if let Err(e) = self.send(user_id, kind, content).await {
            warn!("Failed to send {} notification to user {}: {}", kind, user_id, e);
        }
    }

    pub async fn mark_read(&self, id: &str) -> Result<Notification, AppError> {
        self.notifications
            .mark_read(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))
    }

    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64, AppError> {
        self.notifications.mark_all_read(user_id).await
    }
}
