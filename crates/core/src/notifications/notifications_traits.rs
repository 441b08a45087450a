use chrono::{DateTime, Utc};

use super::notifications_model::{DeliveryChannel, NewNotification, Notification};
use super::transport::TransportError;
use crate::errors::Result;

/// Keyed store for per-user notification sequences and the unread index.
///
/// Implementations only need whole-sequence reads and writes; the service
/// serializes read-modify-write cycles per user.
pub trait NotificationRepositoryTrait: Send + Sync {
    /// Returns the user's notifications in insertion order.
    fn load_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;
    fn save_notifications(&self, user_id: &str, notifications: Vec<Notification>) -> Result<()>;
    /// O(1) membership in the unread index.
    fn is_marked_unread(&self, user_id: &str) -> Result<bool>;
    fn set_marked_unread(&self, user_id: &str, unread: bool) -> Result<()>;
}

/// Out-of-app delivery for one channel.
pub trait NotificationTransport: Send + Sync {
    fn channel(&self) -> DeliveryChannel;
    fn send(
        &self,
        user_id: &str,
        notification: &Notification,
    ) -> std::result::Result<(), TransportError>;
}

/// Notification operations used by producers and UI consumers.
pub trait NotificationServiceTrait: Send + Sync {
    fn create(&self, user_id: &str, new_notification: NewNotification) -> Result<Notification>;
    fn create_at(
        &self,
        user_id: &str,
        new_notification: NewNotification,
        now: DateTime<Utc>,
    ) -> Result<Notification>;
    fn get(&self, user_id: &str, notification_id: &str) -> Result<Option<Notification>>;
    fn list_all(&self, user_id: &str) -> Result<Vec<Notification>>;
    fn list_unread(&self, user_id: &str) -> Result<Vec<Notification>>;
    fn has_unread(&self, user_id: &str) -> Result<bool>;
    fn count_unread(&self, user_id: &str) -> Result<usize>;
    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<bool>;
    fn mark_all_read(&self, user_id: &str) -> Result<usize>;
    fn dismiss(&self, user_id: &str, notification_id: &str) -> Result<bool>;
    fn clear_all(&self, user_id: &str) -> Result<usize>;
}
