mod repository;

pub use repository::AchievementRepository;
