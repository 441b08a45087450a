//! Notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Achievement,
    PaymentReminder,
    GoalProgress,
    FinancialSummary,
    SavingsMilestone,
    SpendingAlert,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Achievement => "achievement",
            NotificationType::PaymentReminder => "payment_reminder",
            NotificationType::GoalProgress => "goal_progress",
            NotificationType::FinancialSummary => "financial_summary",
            NotificationType::SavingsMilestone => "savings_milestone",
            NotificationType::SpendingAlert => "spending_alert",
            NotificationType::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum NotificationPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl NotificationPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPriority::Low => "low",
            NotificationPriority::Medium => "medium",
            NotificationPriority::High => "high",
            NotificationPriority::Urgent => "urgent",
        }
    }
}

/// Independent delivery flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannels {
    pub show_in_app: bool,
    pub send_email: bool,
    pub send_push: bool,
}

impl Default for NotificationChannels {
    fn default() -> Self {
        Self {
            show_in_app: true,
            send_email: false,
            send_push: false,
        }
    }
}

impl NotificationChannels {
    fn with(send_email: bool, send_push: bool) -> Self {
        Self {
            show_in_app: true,
            send_email,
            send_push,
        }
    }
}

/// Out-of-app delivery channel served by a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    Email,
    Push,
}

impl DeliveryChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryChannel::Email => "email",
            DeliveryChannel::Push => "push",
        }
    }
}

impl std::fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored alerting event.
///
/// Only `read` and `dismissed` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub payload: Value,
    pub channels: NotificationChannels,
    pub read: bool,
    pub dismissed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a notification.
///
/// Unset `priority` and `channels` fall back to medium / in-app only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: Option<NotificationPriority>,
    pub payload: Option<Value>,
    pub channels: Option<NotificationChannels>,
}

impl NewNotification {
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
            priority: None,
            payload: None,
            channels: None,
        }
    }

    fn typed(
        notification_type: NotificationType,
        priority: NotificationPriority,
        send_email: bool,
        send_push: bool,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
            priority: Some(priority),
            payload: Some(payload),
            channels: Some(NotificationChannels::with(send_email, send_push)),
        }
    }

    /// Medium priority, in-app only.
    pub fn achievement(
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self::typed(
            NotificationType::Achievement,
            NotificationPriority::Medium,
            false,
            false,
            title,
            message,
            payload,
        )
    }

    /// High priority, emailed.
    pub fn payment_reminder(
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self::typed(
            NotificationType::PaymentReminder,
            NotificationPriority::High,
            true,
            false,
            title,
            message,
            payload,
        )
    }

    /// Medium priority, in-app only.
    pub fn goal_progress(
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self::typed(
            NotificationType::GoalProgress,
            NotificationPriority::Medium,
            false,
            false,
            title,
            message,
            payload,
        )
    }

    /// Low priority, emailed.
    pub fn financial_summary(
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self::typed(
            NotificationType::FinancialSummary,
            NotificationPriority::Low,
            true,
            false,
            title,
            message,
            payload,
        )
    }

    /// High priority, pushed.
    pub fn spending_alert(
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self::typed(
            NotificationType::SpendingAlert,
            NotificationPriority::High,
            false,
            true,
            title,
            message,
            payload,
        )
    }

    /// Medium priority, emailed.
    pub fn savings_milestone(
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self::typed(
            NotificationType::SavingsMilestone,
            NotificationPriority::Medium,
            true,
            false,
            title,
            message,
            payload,
        )
    }

    /// Low priority, in-app only.
    pub fn system(title: impl Into<String>, message: impl Into<String>, payload: Value) -> Self {
        Self::typed(
            NotificationType::System,
            NotificationPriority::Low,
            false,
            false,
            title,
            message,
            payload,
        )
    }

    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Overrides the email flag, keeping the other channel flags.
    pub fn with_email(mut self, send_email: bool) -> Self {
        let mut channels = self.channels.unwrap_or_default();
        channels.send_email = send_email;
        self.channels = Some(channels);
        self
    }

    /// Overrides the push flag, keeping the other channel flags.
    pub fn with_push(mut self, send_push: bool) -> Self {
        let mut channels = self.channels.unwrap_or_default();
        channels.send_push = send_push;
        self.channels = Some(channels);
        self
    }

    /// Materializes a stored notification, applying defaults.
    pub fn into_notification(
        self,
        id: String,
        user_id: &str,
        created_at: DateTime<Utc>,
    ) -> Notification {
        Notification {
            id,
            user_id: user_id.to_string(),
            notification_type: self.notification_type,
            title: self.title,
            message: self.message,
            priority: self.priority.unwrap_or_default(),
            payload: self.payload.unwrap_or(Value::Null),
            channels: self.channels.unwrap_or_default(),
            read: false,
            dismissed: false,
            created_at,
        }
    }
}
