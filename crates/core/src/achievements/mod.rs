//! Achievements module - rule catalogue, pure evaluation and the service
//! that persists per-user progress and announces newly earned achievements.

mod achievements_catalog;
mod achievements_evaluator;
mod achievements_model;
mod achievements_service;
mod achievements_traits;

#[cfg(test)]
mod achievements_service_tests;

pub use achievements_catalog::{find_definition, ACHIEVEMENT_CATALOGUE, DEBT_FREEDOM_ID};
pub use achievements_evaluator::{
    advance_login_streak, apply_update, evaluate, evaluate_definition, goal_milestone_crossed,
    Evaluation,
};
pub use achievements_model::{
    AchievementDefinition, AchievementEntry, AchievementProgress, AchievementStats,
    AchievementSummary, AchievementType, GoalProgressUpdate, HistoryPoint, StatsUpdate,
    UserAchievementState,
};
pub use achievements_service::AchievementService;
pub use achievements_traits::{AchievementRepositoryTrait, AchievementServiceTrait};
