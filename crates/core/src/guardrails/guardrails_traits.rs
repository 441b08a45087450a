use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::guardrails_model::{
    GuardrailAlert, GuardrailStatus, LimitPeriod, SpendingLimit, Transaction, TransactionOutcome,
};
use crate::errors::Result;

/// Source and sink of raw transaction records.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Transactions dated within `[start, end]`, ordered by date.
    fn fetch_transactions(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>>;
    fn insert_transaction(&self, user_id: &str, transaction: Transaction) -> Result<()>;
}

/// Trait for guardrail operations.
pub trait GuardrailServiceTrait: Send + Sync {
    fn check_transaction(
        &self,
        user_id: &str,
        transaction: &Transaction,
        limits: &[SpendingLimit],
    ) -> Result<Vec<GuardrailAlert>>;
    fn check_transaction_at(
        &self,
        user_id: &str,
        transaction: &Transaction,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<Vec<GuardrailAlert>>;
    fn check_all(&self, user_id: &str, limits: &[SpendingLimit]) -> Result<Vec<GuardrailAlert>>;
    fn check_all_at(
        &self,
        user_id: &str,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<Vec<GuardrailAlert>>;
    fn period_spend(
        &self,
        user_id: &str,
        category: &str,
        period: LimitPeriod,
        now: DateTime<Utc>,
    ) -> Result<Decimal>;
    fn record_transaction(
        &self,
        user_id: &str,
        transaction: Transaction,
        limits: &[SpendingLimit],
    ) -> Result<TransactionOutcome>;
    fn record_transaction_at(
        &self,
        user_id: &str,
        transaction: Transaction,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<TransactionOutcome>;
    /// Read-only view of every limit, without notifying.
    fn status(
        &self,
        user_id: &str,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<Vec<GuardrailStatus>>;
}
