//! Achievement domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rule family an achievement is evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    SavingsMilestone,
    Streak,
    BudgetMastery,
    IncomeGrowth,
    DebtReduction,
    ChallengeComplete,
    AccountMilestone,
    LoginStreak,
}

impl AchievementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementType::SavingsMilestone => "savings_milestone",
            AchievementType::Streak => "streak",
            AchievementType::BudgetMastery => "budget_mastery",
            AchievementType::IncomeGrowth => "income_growth",
            AchievementType::DebtReduction => "debt_reduction",
            AchievementType::ChallengeComplete => "challenge_complete",
            AchievementType::AccountMilestone => "account_milestone",
            AchievementType::LoginStreak => "login_streak",
        }
    }
}

/// Static catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub achievement_type: AchievementType,
    pub title: &'static str,
    pub description: &'static str,
    pub threshold: f64,
    /// Major achievements are also announced by email
    pub milestone: bool,
}

/// Per-user progress on one achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub earned: bool,
    /// 0..=100
    pub progress: f64,
    pub earned_at: Option<DateTime<Utc>>,
}

/// Dated amount in the income or debt history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

impl HistoryPoint {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStats {
    pub total_saved: f64,
    pub budget_streak: u32,
    pub completed_challenges: u32,
    pub login_streak: u32,
    pub last_login: Option<NaiveDate>,
    /// Oldest first, capped
    pub monthly_income_history: Vec<HistoryPoint>,
    /// Oldest first, capped
    pub debt_history: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievementState {
    pub user_id: String,
    pub achievements: BTreeMap<String, AchievementProgress>,
    pub stats: AchievementStats,
}

impl UserAchievementState {
    /// Fresh state with one unearned entry per catalogue definition.
    pub fn seeded(user_id: &str, catalogue: &[AchievementDefinition]) -> Self {
        Self {
            user_id: user_id.to_string(),
            achievements: catalogue
                .iter()
                .map(|def| (def.id.to_string(), AchievementProgress::default()))
                .collect(),
            stats: AchievementStats::default(),
        }
    }

    pub fn is_earned(&self, achievement_id: &str) -> bool {
        self.achievements
            .get(achievement_id)
            .map(|p| p.earned)
            .unwrap_or(false)
    }
}

/// Stat deltas merged before an evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdate {
    /// Added to `total_saved`
    pub savings_delta: Option<f64>,
    /// Appended to the income history
    pub income: Option<HistoryPoint>,
    /// Appended to the debt history
    pub debt: Option<HistoryPoint>,
}

/// Goal snapshot used for milestone detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressUpdate {
    pub name: String,
    pub target: f64,
    pub current: f64,
    pub previous_amount: Option<f64>,
}

/// Catalogue entry joined with the user's progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementEntry {
    #[serde(flatten)]
    pub definition: AchievementDefinition,
    pub progress: f64,
    pub earned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementSummary {
    pub stats: AchievementStats,
    pub earned: Vec<AchievementEntry>,
    /// Sorted by progress, highest first
    pub in_progress: Vec<AchievementEntry>,
}
