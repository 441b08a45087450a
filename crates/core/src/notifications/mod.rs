//! Notifications module - the sink every insight producer reports into.
//!
//! - **Models** (`notifications_model.rs`) - Notification, channels, priorities
//! - **Traits** (`notifications_traits.rs`) - Repository, transport and service interfaces
//! - **Sink** (`sink.rs`) - The narrow interface producers depend on
//! - **Transport** (`transport.rs`) - Best-effort email/push delivery stubs
//! - **Service** (`notifications_service.rs`) - Store, read state, dispatch

mod notifications_model;
mod notifications_service;
mod notifications_traits;
mod sink;
mod transport;


pub use notifications_model::{
    DeliveryChannel, NewNotification, Notification, NotificationChannels, NotificationPriority,
    NotificationType,
};
pub use notifications_service::NotificationService;
pub use notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait, NotificationTransport,
};
pub use sink::{MockNotificationSink, NoOpNotificationSink, NotificationSink};
pub use transport::{LoggingTransport, TransportError};
