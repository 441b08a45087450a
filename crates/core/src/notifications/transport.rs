//! Out-of-app delivery.
//!
//! Real email/push providers live outside the engine. The logging transport
//! stands in for them and always succeeds.

use log::info;
use thiserror::Error;

use super::notifications_model::{DeliveryChannel, Notification};
use super::notifications_traits::NotificationTransport;

/// Failures reported by a transport. Never propagated past dispatch.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The provider could not be reached.
    #[error("{channel} transport unavailable: {message}")]
    Unavailable {
        channel: DeliveryChannel,
        message: String,
    },

    /// The provider refused the message (bad address, opted out, ...).
    #[error("{channel} delivery rejected for user {user_id}: {message}")]
    Rejected {
        channel: DeliveryChannel,
        user_id: String,
        message: String,
    },
}

impl TransportError {
    pub fn unavailable(channel: DeliveryChannel, message: impl Into<String>) -> Self {
        Self::Unavailable {
            channel,
            message: message.into(),
        }
    }

    pub fn rejected(
        channel: DeliveryChannel,
        user_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            channel,
            user_id: user_id.into(),
            message: message.into(),
        }
    }
}

/// Transport that records the delivery in the log.
#[derive(Debug, Clone, Copy)]
pub struct LoggingTransport {
    channel: DeliveryChannel,
}

impl LoggingTransport {
    pub fn email() -> Self {
        Self {
            channel: DeliveryChannel::Email,
        }
    }

    pub fn push() -> Self {
        Self {
            channel: DeliveryChannel::Push,
        }
    }
}

impl NotificationTransport for LoggingTransport {
    fn channel(&self) -> DeliveryChannel {
        self.channel
    }

    fn send(&self, user_id: &str, notification: &Notification) -> Result<(), TransportError> {
        info!(
            "[{}] to user {}: {} ({})",
            self.channel, user_id, notification.title, notification.id
        );
        Ok(())
    }
}
