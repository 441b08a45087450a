//! Notification sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::notifications_model::{NewNotification, Notification};

/// Trait through which producers publish notifications.
///
/// Producers (achievements, guardrails, summaries, scorecards) depend on this
/// abstraction only, never on the concrete service.
///
/// # Design Rules
///
/// - `notify()` never fails the producer: storage errors are logged by the
///   implementation and reported as `None`
/// - Delivery to out-of-app channels happens behind this call
pub trait NotificationSink: Send + Sync {
    /// Publish one notification for `user_id`.
    fn notify(&self, user_id: &str, notification: NewNotification) -> Option<Notification>;
}

/// No-op implementation for contexts that don't need notifications.
#[derive(Clone, Default)]
pub struct NoOpNotificationSink;

impl NotificationSink for NoOpNotificationSink {
    fn notify(&self, _user_id: &str, _notification: NewNotification) -> Option<Notification> {
        None
    }
}

/// Mock sink for testing - collects published notifications.
#[derive(Clone, Default)]
pub struct MockNotificationSink {
    published: Arc<Mutex<Vec<(String, NewNotification)>>>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected `(user_id, notification)` pairs.
    pub fn published(&self) -> Vec<(String, NewNotification)> {
        self.published.lock().unwrap().clone()
    }

    /// Returns the collected notifications for one user.
    pub fn for_user(&self, user_id: &str) -> Vec<NewNotification> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == user_id)
            .map(|(_, n)| n.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.published.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.published.lock().unwrap().is_empty()
    }
}

impl NotificationSink for MockNotificationSink {
    fn notify(&self, user_id: &str, notification: NewNotification) -> Option<Notification> {
        let stored = notification.clone().into_notification(
            format!("mock-{}", self.len() + 1),
            user_id,
            chrono::Utc::now(),
        );
        self.published
            .lock()
            .unwrap()
            .push((user_id.to_string(), notification));
        Some(stored)
    }
}
