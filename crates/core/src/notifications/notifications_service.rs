//! Notification service implementation.
//!
//! Owns per-user notification sequences, the unread index and best-effort
//! dispatch to the email and push transports.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::notifications_model::{NewNotification, Notification};
use super::notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait, NotificationTransport,
};
use super::sink::NotificationSink;
use super::transport::LoggingTransport;
use crate::errors::Result;
use crate::utils::user_locks::{acquire, UserLocks};

pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
    email_transport: Arc<dyn NotificationTransport>,
    push_transport: Arc<dyn NotificationTransport>,
    locks: UserLocks,
}

impl NotificationService {
    /// Creates a service delivering email/push through the logging transports.
    pub fn new(repository: Arc<dyn NotificationRepositoryTrait>) -> Self {
        Self::with_transports(
            repository,
            Arc::new(LoggingTransport::email()),
            Arc::new(LoggingTransport::push()),
        )
    }

    pub fn with_transports(
        repository: Arc<dyn NotificationRepositoryTrait>,
        email_transport: Arc<dyn NotificationTransport>,
        push_transport: Arc<dyn NotificationTransport>,
    ) -> Self {
        Self {
            repository,
            email_transport,
            push_transport,
            locks: UserLocks::new(),
        }
    }

    /// Fire-and-forget delivery. Failures are logged and never surface.
    fn dispatch(&self, user_id: &str, notification: &Notification) {
        let targets = [
            (notification.channels.send_email, &self.email_transport),
            (notification.channels.send_push, &self.push_transport),
        ];
        for (enabled, transport) in targets {
            if !enabled {
                continue;
            }
            if let Err(e) = transport.send(user_id, notification) {
                warn!(
                    "Failed to deliver notification {} via {}: {}",
                    notification.id,
                    transport.channel(),
                    e
                );
            }
        }
    }

    /// Applies `mutate` to the user's sequence under the user lock and
    /// persists the result together with the recomputed unread flag.
    fn update_sequence<T, F>(&self, user_id: &str, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Notification>) -> T,
    {
        let handle = self.locks.handle(user_id);
        let _guard = acquire(&handle);

        let mut notifications = self.repository.load_notifications(user_id)?;
        let result = mutate(&mut notifications);
        let any_unread = notifications.iter().any(|n| !n.read);
        self.repository.save_notifications(user_id, notifications)?;
        if !any_unread {
            self.repository.set_marked_unread(user_id, false)?;
        }
        Ok(result)
    }
}

impl NotificationServiceTrait for NotificationService {
    fn create(&self, user_id: &str, new_notification: NewNotification) -> Result<Notification> {
        self.create_at(user_id, new_notification, Utc::now())
    }

    fn create_at(
        &self,
        user_id: &str,
        new_notification: NewNotification,
        now: DateTime<Utc>,
    ) -> Result<Notification> {
        let notification =
            new_notification.into_notification(Uuid::new_v4().to_string(), user_id, now);

        {
            let handle = self.locks.handle(user_id);
            let _guard = acquire(&handle);
            let mut notifications = self.repository.load_notifications(user_id)?;
            notifications.push(notification.clone());
            self.repository.save_notifications(user_id, notifications)?;
            // Unread regardless of channel flags
            self.repository.set_marked_unread(user_id, true)?;
        }

        debug!(
            "Created {} notification {} for user {}",
            notification.notification_type, notification.id, user_id
        );
        self.dispatch(user_id, &notification);
        Ok(notification)
    }

    fn get(&self, user_id: &str, notification_id: &str) -> Result<Option<Notification>> {
        Ok(self
            .repository
            .load_notifications(user_id)?
            .into_iter()
            .find(|n| n.id == notification_id))
    }

    fn list_all(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.repository.load_notifications(user_id)
    }

    fn list_unread(&self, user_id: &str) -> Result<Vec<Notification>> {
        Ok(self
            .repository
            .load_notifications(user_id)?
            .into_iter()
            .filter(|n| !n.read)
            .collect())
    }

    fn has_unread(&self, user_id: &str) -> Result<bool> {
        self.repository.is_marked_unread(user_id)
    }

    fn count_unread(&self, user_id: &str) -> Result<usize> {
        Ok(self
            .repository
            .load_notifications(user_id)?
            .iter()
            .filter(|n| !n.read)
            .count())
    }

    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<bool> {
        self.update_sequence(user_id, |notifications| {
            match notifications.iter_mut().find(|n| n.id == notification_id) {
                Some(notification) => {
                    notification.read = true;
                    true
                }
                None => false,
            }
        })
    }

    fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.update_sequence(user_id, |notifications| {
            let mut marked = 0;
            for notification in notifications.iter_mut().filter(|n| !n.read) {
                notification.read = true;
                marked += 1;
            }
            marked
        })
    }

    fn dismiss(&self, user_id: &str, notification_id: &str) -> Result<bool> {
        // Dismissal leaves `read` and the unread index untouched.
        let handle = self.locks.handle(user_id);
        let _guard = acquire(&handle);

        let mut notifications = self.repository.load_notifications(user_id)?;
        let found = match notifications.iter_mut().find(|n| n.id == notification_id) {
            Some(notification) => {
                notification.dismissed = true;
                true
            }
            None => false,
        };
        if found {
            self.repository.save_notifications(user_id, notifications)?;
        }
        Ok(found)
    }

    fn clear_all(&self, user_id: &str) -> Result<usize> {
        self.update_sequence(user_id, |notifications| {
            let cleared = notifications.len();
            notifications.clear();
            cleared
        })
    }
}

impl NotificationSink for NotificationService {
    fn notify(&self, user_id: &str, notification: NewNotification) -> Option<Notification> {
        match self.create(user_id, notification) {
            Ok(created) => Some(created),
            Err(e) => {
                warn!("Failed to store notification for user {}: {}", user_id, e);
                None
            }
        }
    }
}
