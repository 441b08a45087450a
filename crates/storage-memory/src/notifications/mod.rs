mod repository;

pub use repository::NotificationRepository;
