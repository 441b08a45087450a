//! Financial summary domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPeriod {
    Weekly,
    Monthly,
}

impl SummaryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryPeriod::Weekly => "weekly",
            SummaryPeriod::Monthly => "monthly",
        }
    }

    /// Phrase used in summary copy ("this week").
    pub fn noun(&self) -> &'static str {
        match self {
            SummaryPeriod::Weekly => "week",
            SummaryPeriod::Monthly => "month",
        }
    }

    /// Number of expense categories reported as top spending.
    pub fn top_category_count(&self) -> usize {
        match self {
            SummaryPeriod::Weekly => 1,
            SummaryPeriod::Monthly => 3,
        }
    }
}

impl std::fmt::Display for SummaryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub amount: Decimal,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl IncomeRecord {
    pub fn new(source: impl Into<String>, amount: Decimal) -> Self {
        Self {
            amount,
            source: Some(source.into()),
            date: None,
        }
    }
}

/// Expense record. The sign of `amount` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ExpenseRecord {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            amount,
            category: Some(category.into()),
            date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryGoal {
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
}

/// Records of the period being summarized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeriodData {
    pub income: Vec<IncomeRecord>,
    pub expenses: Vec<ExpenseRecord>,
    /// Reported on monthly summaries only
    pub goals: Vec<SummaryGoal>,
}

/// Totals of the previous month, used for month-over-month change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriod {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedAmount {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChange {
    pub income_change: Decimal,
    pub expense_change: Decimal,
    pub savings_rate_change: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub user_id: String,
    pub period: SummaryPeriod,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_cashflow: Decimal,
    /// Percent of income kept, one decimal; zero without income
    pub savings_rate: Decimal,
    pub top_spending_categories: Vec<NamedAmount>,
    pub income_breakdown: Vec<NamedAmount>,
    pub expenses_by_category: Vec<NamedAmount>,
    /// Month-over-month change; monthly summaries with a previous period only
    pub changes: Option<PeriodChange>,
    pub goals: Vec<GoalStatus>,
    pub message: String,
}

impl FinancialSummary {
    pub fn top_spending_category(&self) -> Option<&NamedAmount> {
        self.top_spending_categories.first()
    }

    /// Totals to feed into next month's change computation.
    pub fn as_previous(&self) -> PreviousPeriod {
        PreviousPeriod {
            total_income: self.total_income,
            total_expenses: self.total_expenses,
            savings_rate: self.savings_rate,
        }
    }
}
