//! Scorecard domain models.
//!
//! Snapshot amounts are plain `f64`: the scorecard reports ratios and
//! integer points, never money.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Snapshot
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotIncome {
    pub amount: f64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotExpense {
    /// Sign is ignored
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotGoal {
    pub name: String,
    #[serde(default)]
    pub target: Option<f64>,
    /// Amount saved so far
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDebt {
    pub name: String,
    pub balance: f64,
    /// Annual rate in percent
    #[serde(default)]
    pub interest_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInvestment {
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: String,
    pub amount: f64,
}

impl SnapshotInvestment {
    /// Whether the name or type marks a retirement account.
    pub fn is_retirement(&self) -> bool {
        const MARKERS: [&str; 3] = ["retirement", "401k", "ira"];
        let name = self.name.to_lowercase();
        let kind = self.investment_type.to_lowercase();
        MARKERS.iter().any(|m| name.contains(m) || kind.contains(m))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBudget {
    pub category: String,
    pub limit: f64,
}

/// A configured spending limit with the spend of its current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitUsage {
    pub category: String,
    pub amount: f64,
    pub spent: f64,
}

impl LimitUsage {
    pub fn is_exceeded(&self) -> bool {
        self.spent >= self.amount
    }
}

/// Needs/wants/savings allocation in percent of income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSplit {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

/// Everything the scorecard reads for one user. Records are chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSnapshot {
    pub income: Vec<SnapshotIncome>,
    pub expenses: Vec<SnapshotExpense>,
    pub goals: Vec<SnapshotGoal>,
    pub debts: Vec<SnapshotDebt>,
    pub investments: Vec<SnapshotInvestment>,
    pub budgets: Vec<SnapshotBudget>,
    pub spending_limits: Vec<LimitUsage>,
    pub income_split: Option<IncomeSplit>,
}

// =============================================================================
// Scorecard
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    IncomeStability,
    SavingsRatio,
    InvestmentHealth,
    DebtManagement,
    ExpenseControl,
    GoalProgress,
    GuardrailsUsage,
    /// General advice not tied to one category
    General,
    /// Scorecard could not be computed
    System,
}

impl ScoreCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::IncomeStability => "income_stability",
            ScoreCategory::SavingsRatio => "savings_ratio",
            ScoreCategory::InvestmentHealth => "investment_health",
            ScoreCategory::DebtManagement => "debt_management",
            ScoreCategory::ExpenseControl => "expense_control",
            ScoreCategory::GoalProgress => "goal_progress",
            ScoreCategory::GuardrailsUsage => "guardrails_usage",
            ScoreCategory::General => "general",
            ScoreCategory::System => "system",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ScoreCategory::IncomeStability => "Income Stability",
            ScoreCategory::SavingsRatio => "Savings Ratio",
            ScoreCategory::InvestmentHealth => "Investment Health",
            ScoreCategory::DebtManagement => "Debt Management",
            ScoreCategory::ExpenseControl => "Expense Control",
            ScoreCategory::GoalProgress => "Goal Progress",
            ScoreCategory::GuardrailsUsage => "Guardrails Usage",
            ScoreCategory::General => "General",
            ScoreCategory::System => "System",
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: ScoreCategory,
    pub name: String,
    pub points: u32,
    pub max_points: u32,
    /// `round(points / max_points * 100)`
    pub percentage: u32,
    pub details: Vec<String>,
}

impl CategoryScore {
    pub fn new(
        category: ScoreCategory,
        points: u32,
        max_points: u32,
        details: Vec<String>,
    ) -> Self {
        let percentage = if max_points == 0 {
            0
        } else {
            (f64::from(points) * 100.0 / f64::from(max_points)).round() as u32
        };
        Self {
            category,
            name: category.display_name().to_string(),
            points,
            max_points,
            percentage,
            details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: ScoreCategory,
    pub text: String,
    pub priority: RecommendationPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: String,
    pub text: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
}

/// User-facing band an overall score falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub min: u32,
    pub max: u32,
    pub level: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub overall_score: u32,
    pub category_scores: Vec<CategoryScore>,
    pub recommendations: Vec<Recommendation>,
    pub insights: Vec<Insight>,
    pub score_level: String,
    pub score_color: String,
    pub score_description: String,
    /// Set on the fallback returned when scoring failed; never persisted
    #[serde(default)]
    pub degraded: bool,
}

impl ScoreCard {
    pub fn top_recommendation(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }
}

/// Progress of the latest generation for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardStatus {
    #[default]
    Idle,
    Computing,
    Ready,
    Error,
}
