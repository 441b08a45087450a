//! Financial wellness scorecard.
//!
//! Computes a 0-100 composite score across seven weighted categories from a
//! user's financial snapshot, derives recommendations and insights, and keeps
//! a short per-user history.
//!
//! # Architecture
//!
//! - `scorers/` - one `CategoryScorer` per weighted category
//! - `scoring` - snapshot validation and score aggregation
//! - `advice` - score bands, recommendations, insights, degraded fallback
//! - `service` - fetch, compute, persist and announce

pub mod advice;
pub mod errors;
pub mod model;
pub mod scorers;
pub mod scoring;
pub mod service;
pub mod traits;


pub use advice::{band_for, degraded_scorecard, SCORE_BANDS, UNAVAILABLE_LEVEL};
pub use errors::ScorecardError;
pub use model::{
    CategoryScore, FinancialSnapshot, IncomeSplit, Insight, InsightType, LimitUsage,
    Recommendation, RecommendationPriority, ScoreBand, ScoreCard, ScoreCategory,
    ScorecardStatus, SnapshotBudget, SnapshotDebt, SnapshotExpense, SnapshotGoal,
    SnapshotIncome, SnapshotInvestment,
};
pub use scorers::default_scorers;
pub use scoring::{compute_scorecard, overall_score, validate_snapshot};
pub use service::ScorecardService;
pub use traits::{
    CategoryScorer, FinancialSnapshotSource, ScorecardRepositoryTrait, ScorecardServiceTrait,
    ScoringContext,
};
