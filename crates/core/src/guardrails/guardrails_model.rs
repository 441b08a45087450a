//! Guardrail domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitPeriod {
    Weekly,
    Monthly,
}

impl LimitPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitPeriod::Weekly => "weekly",
            LimitPeriod::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for LimitPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingLimit {
    pub category: String,
    pub amount: Decimal,
    pub period: LimitPeriod,
}

/// Raw transaction. Expenses carry negative amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Option<String>,
    pub category: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl Transaction {
    pub fn expense(category: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: None,
            category: Some(category.into()),
            amount,
            date,
            description: None,
        }
    }

    /// Case-insensitive category match.
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .map(|c| c.eq_ignore_ascii_case(category))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Approaching,
    Exceeded,
}

/// One threshold crossing reported for a limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailAlert {
    pub kind: AlertKind,
    pub category: String,
    pub period: LimitPeriod,
    pub limit_amount: Decimal,
    pub current_spending: Decimal,
    /// Spend as a percentage of the limit, one decimal
    pub percentage: Decimal,
    /// Amount over the limit; set for exceeded alerts only
    pub overage: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailState {
    Ok,
    Approaching,
    Exceeded,
}

/// Point-in-time usage of one limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailStatus {
    pub category: String,
    pub period: LimitPeriod,
    pub limit_amount: Decimal,
    pub spent: Decimal,
    /// Never negative
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub state: GuardrailState,
}

/// Result of recording a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransactionOutcome {
    /// Validation failed; nothing was checked or stored.
    Rejected { reason: String },
    Recorded { alerts: Vec<GuardrailAlert> },
}
