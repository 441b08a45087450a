use chrono::{DateTime, NaiveDate, Utc};

use super::achievements_model::{
    AchievementDefinition, AchievementSummary, GoalProgressUpdate, StatsUpdate,
    UserAchievementState,
};
use crate::errors::Result;

/// Keyed store for per-user achievement state.
pub trait AchievementRepositoryTrait: Send + Sync {
    fn load_state(&self, user_id: &str) -> Result<Option<UserAchievementState>>;
    fn save_state(&self, state: UserAchievementState) -> Result<()>;
}

/// Trait for achievement service operations.
pub trait AchievementServiceTrait: Send + Sync {
    /// Seeds state for `user_id` if none exists. Idempotent.
    fn initialize(&self, user_id: &str) -> Result<UserAchievementState>;
    fn get_state(&self, user_id: &str) -> Result<UserAchievementState>;
    /// Merges `update` and walks the catalogue. Returns newly earned entries.
    fn evaluate(
        &self,
        user_id: &str,
        update: Option<StatsUpdate>,
    ) -> Result<Vec<AchievementDefinition>>;
    fn evaluate_at(
        &self,
        user_id: &str,
        update: Option<StatsUpdate>,
        now: DateTime<Utc>,
    ) -> Result<Vec<AchievementDefinition>>;
    /// Returns the streak after the check-in.
    fn update_login_streak(&self, user_id: &str) -> Result<u32>;
    fn update_login_streak_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<u32>;
    /// Returns the streak after the update.
    fn update_budget_streak(&self, user_id: &str, under_budget: bool) -> Result<u32>;
    /// Returns the completed challenge count.
    fn complete_challenge(&self, user_id: &str) -> Result<u32>;
    fn record_savings(&self, user_id: &str, amount: f64) -> Result<Vec<AchievementDefinition>>;
    fn record_income(
        &self,
        user_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<Vec<AchievementDefinition>>;
    fn record_debt(
        &self,
        user_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<Vec<AchievementDefinition>>;
    /// Returns whether a goal milestone notification fired.
    fn track_goal_progress(&self, user_id: &str, goal: &GoalProgressUpdate) -> bool;
    fn get_summary(&self, user_id: &str) -> Result<AchievementSummary>;
}
