//! Notification repository implementation.

use std::sync::Arc;

use finsight_core::notifications::{Notification, NotificationRepositoryTrait};
use finsight_core::Result;

use crate::errors::IntoCore;
use crate::store::MemoryStore;

pub struct NotificationRepository {
    store: Arc<MemoryStore>,
}

impl NotificationRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl NotificationRepositoryTrait for NotificationRepository {
    fn load_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        Ok(self
            .store
            .notifications
            .get::<Vec<Notification>>(user_id)
            .into_core()?
            .unwrap_or_default())
    }

    fn save_notifications(&self, user_id: &str, notifications: Vec<Notification>) -> Result<()> {
        if notifications.is_empty() {
            self.store.notifications.remove(user_id);
            return Ok(());
        }
        self.store
            .notifications
            .put(user_id, &notifications)
            .into_core()
    }

    fn is_marked_unread(&self, user_id: &str) -> Result<bool> {
        Ok(self.store.unread_users.contains(user_id))
    }

    fn set_marked_unread(&self, user_id: &str, unread: bool) -> Result<()> {
        if unread {
            self.store.unread_users.insert(user_id.to_string());
        } else {
            self.store.unread_users.remove(user_id);
        }
        Ok(())
    }
}
