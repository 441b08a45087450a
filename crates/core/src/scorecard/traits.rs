//! Scorecard traits.
//!
//! - `CategoryScorer` - one weighted scoring category
//! - `ScorecardRepositoryTrait` - per-user scorecard history storage
//! - `FinancialSnapshotSource` - external financial data fetch
//! - `ScorecardServiceTrait` - generation and read-side contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::ScorecardError;
use super::model::{CategoryScore, FinancialSnapshot, ScoreCard, ScoreCategory, ScorecardStatus};
use crate::errors::Result;

/// Inputs shared by every category scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    /// Savings target in percent of income
    pub savings_target: f64,
}

/// One weighted scoring category.
///
/// Scorers are pure: the same snapshot always yields the same score, and
/// `points` never exceeds `max_points()`.
pub trait CategoryScorer: Send + Sync {
    fn category(&self) -> ScoreCategory;

    fn max_points(&self) -> u32;

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        ctx: &ScoringContext,
    ) -> std::result::Result<CategoryScore, ScorecardError>;
}

/// Storage for a user's scorecard history, newest first.
pub trait ScorecardRepositoryTrait: Send + Sync {
    fn load_history(&self, user_id: &str) -> Result<Vec<ScoreCard>>;
    fn save_history(&self, user_id: &str, history: Vec<ScoreCard>) -> Result<()>;
}

/// Supplies the financial records a scorecard is computed from.
#[async_trait]
pub trait FinancialSnapshotSource: Send + Sync {
    async fn fetch_snapshot(
        &self,
        user_id: &str,
    ) -> std::result::Result<FinancialSnapshot, ScorecardError>;
}

#[async_trait]
pub trait ScorecardServiceTrait: Send + Sync {
    /// Fetches, computes, persists and announces a scorecard. Computation
    /// failures return a degraded scorecard instead of an error.
    async fn generate(&self, user_id: &str) -> Result<ScoreCard>;
    async fn generate_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<ScoreCard>;
    /// Regenerates only when the latest scorecard is missing or stale.
    async fn generate_if_stale(&self, user_id: &str) -> Result<ScoreCard>;
    async fn generate_if_stale_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<ScoreCard>;
    fn save(&self, user_id: &str, scorecard: ScoreCard) -> Result<()>;
    fn get_latest(&self, user_id: &str) -> Result<Option<ScoreCard>>;
    fn get_history(&self, user_id: &str) -> Result<Vec<ScoreCard>>;
    fn should_regenerate(&self, user_id: &str) -> Result<bool>;
    fn should_regenerate_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<bool>;
    fn status(&self, user_id: &str) -> ScorecardStatus;
}
