//! Financial snapshot source backed by the store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use finsight_core::guardrails::GuardrailServiceTrait;
use finsight_core::scorecard::{
    FinancialSnapshot, FinancialSnapshotSource, LimitUsage, ScorecardError, SnapshotBudget,
    SnapshotDebt, SnapshotExpense, SnapshotGoal, SnapshotIncome, SnapshotInvestment,
};

use super::repository::FinancialRecordsRepository;
use crate::transactions::TransactionRepository;

/// Non-representable amounts become NaN and are rejected by snapshot validation.
fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(f64::NAN)
}

/// Builds scorecard snapshots from stored records and transactions.
///
/// Limit usage is read through the guardrail service so the scorecard sees
/// the same period spend the alerts are computed from.
pub struct StoredSnapshotSource {
    records: Arc<FinancialRecordsRepository>,
    transactions: Arc<TransactionRepository>,
    guardrails: Arc<dyn GuardrailServiceTrait>,
}

impl StoredSnapshotSource {
    pub fn new(
        records: Arc<FinancialRecordsRepository>,
        transactions: Arc<TransactionRepository>,
        guardrails: Arc<dyn GuardrailServiceTrait>,
    ) -> Self {
        Self {
            records,
            transactions,
            guardrails,
        }
    }

    pub fn snapshot_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<FinancialSnapshot, ScorecardError> {
        let unavailable =
            |e: finsight_core::Error| ScorecardError::unavailable(user_id, e.to_string());

        let records = self.records.load(user_id).map_err(unavailable)?;
        let transactions = self.transactions.list(user_id).map_err(unavailable)?;
        let records = match records {
            Some(records) => records,
            None if !transactions.is_empty() => Default::default(),
            None => return Err(ScorecardError::unavailable(user_id, "no financial records")),
        };

        let usage = self
            .guardrails
            .status(user_id, &records.spending_limits, now)
            .map_err(unavailable)?;

        debug!(
            "Snapshot for {}: {} income, {} transactions, {} limits",
            user_id,
            records.income.len(),
            transactions.len(),
            usage.len()
        );

        Ok(FinancialSnapshot {
            income: records
                .income
                .iter()
                .map(|entry| SnapshotIncome {
                    amount: to_f64(entry.amount),
                    source: entry.source.clone(),
                    date: Some(entry.date),
                })
                .collect(),
            expenses: transactions
                .into_iter()
                .filter(|t| t.amount.is_sign_negative())
                .map(|t| SnapshotExpense {
                    amount: to_f64(t.amount),
                    category: t.category,
                    date: Some(t.date),
                })
                .collect(),
            goals: records
                .goals
                .iter()
                .map(|goal| SnapshotGoal {
                    name: goal.name.clone(),
                    target: Some(to_f64(goal.target)),
                    progress: Some(to_f64(goal.current)),
                    completed: goal.completed,
                })
                .collect(),
            debts: records
                .debts
                .iter()
                .map(|debt| SnapshotDebt {
                    name: debt.name.clone(),
                    balance: to_f64(debt.balance),
                    interest_rate: to_f64(debt.interest_rate),
                })
                .collect(),
            investments: records
                .investments
                .iter()
                .map(|investment| SnapshotInvestment {
                    name: investment.name.clone(),
                    investment_type: investment.investment_type.clone(),
                    amount: to_f64(investment.amount),
                })
                .collect(),
            budgets: records
                .budgets
                .iter()
                .map(|budget| SnapshotBudget {
                    category: budget.category.clone(),
                    limit: to_f64(budget.limit),
                })
                .collect(),
            spending_limits: usage
                .into_iter()
                .map(|status| LimitUsage {
                    category: status.category,
                    amount: to_f64(status.limit_amount),
                    spent: to_f64(status.spent),
                })
                .collect(),
            income_split: records.income_split,
        })
    }
}

#[async_trait]
impl FinancialSnapshotSource for StoredSnapshotSource {
    async fn fetch_snapshot(&self, user_id: &str) -> Result<FinancialSnapshot, ScorecardError> {
        self.snapshot_at(user_id, Utc::now())
    }
}
