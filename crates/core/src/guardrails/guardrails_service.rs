use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use super::guardrails_model::{
    AlertKind, GuardrailAlert, GuardrailState, GuardrailStatus, LimitPeriod, SpendingLimit,
    Transaction, TransactionOutcome,
};
use super::guardrails_traits::{GuardrailServiceTrait, TransactionRepositoryTrait};
use crate::config::InsightConfig;
use crate::errors::Result;
use crate::notifications::{NewNotification, NotificationSink};
use crate::utils::format::{money, round_percent};
use crate::utils::time_utils::{local_date, month_to_date, trailing_week};
use crate::utils::user_locks::{acquire, UserLocks};

/// Inclusive date window a period covers on `today`.
pub fn period_window(period: LimitPeriod, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match period {
        LimitPeriod::Weekly => trailing_week(today),
        LimitPeriod::Monthly => month_to_date(today),
    }
}

/// Limit whose category matches `category`, ignoring case.
pub fn find_limit<'a>(limits: &'a [SpendingLimit], category: &str) -> Option<&'a SpendingLimit> {
    limits
        .iter()
        .find(|limit| limit.category.eq_ignore_ascii_case(category))
}

pub struct GuardrailService {
    transactions: Arc<dyn TransactionRepositoryTrait>,
    sink: Arc<dyn NotificationSink>,
    config: InsightConfig,
    locks: UserLocks,
}

impl GuardrailService {
    pub fn new(
        transactions: Arc<dyn TransactionRepositoryTrait>,
        sink: Arc<dyn NotificationSink>,
        config: InsightConfig,
    ) -> Self {
        GuardrailService {
            transactions,
            sink,
            config,
            locks: UserLocks::new(),
        }
    }

    fn approaching_floor(&self, limit_amount: Decimal) -> Decimal {
        let ratio = Decimal::from_f64(self.config.approaching_ratio).unwrap_or(Decimal::ONE);
        limit_amount * ratio
    }

    fn percent_of(spent: Decimal, limit_amount: Decimal) -> Decimal {
        if limit_amount.is_zero() {
            return Decimal::ZERO;
        }
        round_percent(spent * Decimal::ONE_HUNDRED / limit_amount)
    }

    /// Evaluates both predicates independently for one limit.
    fn evaluate_limit(
        &self,
        limit: &SpendingLimit,
        current_spending: Decimal,
    ) -> Vec<GuardrailAlert> {
        let mut alerts = Vec::new();
        let percentage = Self::percent_of(current_spending, limit.amount);
        let alert = |kind, overage| GuardrailAlert {
            kind,
            category: limit.category.clone(),
            period: limit.period,
            limit_amount: limit.amount,
            current_spending,
            percentage,
            overage,
        };

        let approaching_floor = self.approaching_floor(limit.amount);
        if current_spending >= approaching_floor && current_spending < limit.amount {
            alerts.push(alert(AlertKind::Approaching, None));
        }
        if current_spending >= limit.amount {
            alerts.push(alert(
                AlertKind::Exceeded,
                Some(current_spending - limit.amount),
            ));
        }
        alerts
    }

    fn announce(&self, user_id: &str, alert: &GuardrailAlert) {
        let (title, message) = match alert.kind {
            AlertKind::Approaching => (
                format!("Approaching your {} limit", alert.category),
                format!(
                    "You've spent {} of your {} {} {} budget ({}%).",
                    money(alert.current_spending),
                    money(alert.limit_amount),
                    alert.period,
                    alert.category,
                    alert.percentage
                ),
            ),
            AlertKind::Exceeded => (
                format!("{} limit exceeded", alert.category),
                format!(
                    "You've exceeded your {} {} budget of {} by {}.",
                    alert.period,
                    alert.category,
                    money(alert.limit_amount),
                    money(alert.overage.unwrap_or_default())
                ),
            ),
        };
        let payload = json!({
            "alertType": alert.kind,
            "category": alert.category,
            "period": alert.period,
            "limitAmount": alert.limit_amount,
            "currentSpending": alert.current_spending,
            "percentage": alert.percentage,
            "overage": alert.overage,
        });
        info!(
            "Guardrail {:?} for user {} on {}: {} of {}",
            alert.kind, user_id, alert.category, alert.current_spending, alert.limit_amount
        );
        self.sink
            .notify(user_id, NewNotification::spending_alert(title, message, payload));
    }

    fn check_against_limits(
        &self,
        user_id: &str,
        transaction: &Transaction,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<Vec<GuardrailAlert>> {
        let Some(category) = transaction.category.as_deref() else {
            return Ok(Vec::new());
        };
        let Some(limit) = find_limit(limits, category) else {
            debug!("No spending limit configured for category '{}'", category);
            return Ok(Vec::new());
        };
        if limit.amount <= Decimal::ZERO {
            debug!("Ignoring non-positive limit for '{}'", limit.category);
            return Ok(Vec::new());
        }

        let spent = self.period_spend(user_id, &limit.category, limit.period, now)?;
        let current_spending = spent + transaction.amount.abs();
        let alerts = self.evaluate_limit(limit, current_spending);
        for alert in &alerts {
            self.announce(user_id, alert);
        }
        Ok(alerts)
    }
}

impl GuardrailServiceTrait for GuardrailService {
    fn check_transaction(
        &self,
        user_id: &str,
        transaction: &Transaction,
        limits: &[SpendingLimit],
    ) -> Result<Vec<GuardrailAlert>> {
        self.check_transaction_at(user_id, transaction, limits, Utc::now())
    }

    fn check_transaction_at(
        &self,
        user_id: &str,
        transaction: &Transaction,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<Vec<GuardrailAlert>> {
        self.check_against_limits(user_id, transaction, limits, now)
    }

    fn check_all(&self, user_id: &str, limits: &[SpendingLimit]) -> Result<Vec<GuardrailAlert>> {
        self.check_all_at(user_id, limits, Utc::now())
    }

    fn check_all_at(
        &self,
        user_id: &str,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<Vec<GuardrailAlert>> {
        let today = local_date(now, self.config.tz_or_utc());
        let mut alerts = Vec::new();
        for limit in limits {
            // Zero-amount reference transaction: evaluates the spend already booked
            let reference = Transaction::expense(limit.category.clone(), Decimal::ZERO, today);
            alerts.extend(self.check_against_limits(
                user_id,
                &reference,
                std::slice::from_ref(limit),
                now,
            )?);
        }
        Ok(alerts)
    }

    fn period_spend(
        &self,
        user_id: &str,
        category: &str,
        period: LimitPeriod,
        now: DateTime<Utc>,
    ) -> Result<Decimal> {
        let today = local_date(now, self.config.tz_or_utc());
        let (start, end) = period_window(period, today);
        let total: Decimal = self
            .transactions
            .fetch_transactions(user_id, start, end)?
            .iter()
            .filter(|t| t.is_in_category(category))
            .map(|t| t.amount.abs())
            .sum();
        Ok(total)
    }

    fn record_transaction(
        &self,
        user_id: &str,
        transaction: Transaction,
        limits: &[SpendingLimit],
    ) -> Result<TransactionOutcome> {
        self.record_transaction_at(user_id, transaction, limits, Utc::now())
    }

    fn record_transaction_at(
        &self,
        user_id: &str,
        transaction: Transaction,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<TransactionOutcome> {
        if user_id.trim().is_empty() {
            return Ok(TransactionOutcome::Rejected {
                reason: "userId is required".to_string(),
            });
        }
        if transaction
            .category
            .as_deref()
            .map(|c| c.trim().is_empty())
            .unwrap_or(true)
        {
            return Ok(TransactionOutcome::Rejected {
                reason: "category is required".to_string(),
            });
        }
        if transaction.amount >= Decimal::ZERO {
            return Ok(TransactionOutcome::Rejected {
                reason: "expense amount must be negative".to_string(),
            });
        }

        let handle = self.locks.handle(user_id);
        let _guard = acquire(&handle);

        // Check before persisting so the period spend excludes this transaction
        let alerts = self.check_against_limits(user_id, &transaction, limits, now)?;
        self.transactions.insert_transaction(user_id, transaction)?;
        Ok(TransactionOutcome::Recorded { alerts })
    }

    fn status(
        &self,
        user_id: &str,
        limits: &[SpendingLimit],
        now: DateTime<Utc>,
    ) -> Result<Vec<GuardrailStatus>> {
        limits
            .iter()
            .map(|limit| {
                let spent = self.period_spend(user_id, &limit.category, limit.period, now)?;
                let state = if limit.amount > Decimal::ZERO && spent >= limit.amount {
                    GuardrailState::Exceeded
                } else if limit.amount > Decimal::ZERO
                    && spent >= self.approaching_floor(limit.amount)
                {
                    GuardrailState::Approaching
                } else {
                    GuardrailState::Ok
                };
                Ok(GuardrailStatus {
                    category: limit.category.clone(),
                    period: limit.period,
                    limit_amount: limit.amount,
                    spent,
                    remaining: (limit.amount - spent).max(Decimal::ZERO),
                    percent_used: Self::percent_of(spent, limit.amount),
                    state,
                })
            })
            .collect()
    }
}
