use chrono::{DateTime, Utc};
use log::info;
use serde_json::json;
use std::sync::Arc;

use super::summaries_calculator::{
    changes, compose_message, goal_statuses, top_categories, totals,
};
use super::summaries_model::{FinancialSummary, PeriodData, PreviousPeriod, SummaryPeriod};
use super::summaries_traits::SummaryServiceTrait;
use crate::config::InsightConfig;
use crate::errors::{Result, ValidationError};
use crate::notifications::{NewNotification, NotificationSink};
use crate::utils::time_utils::{local_date, month_to_date, trailing_week};

/// Builds periodic summaries and publishes them as `financial_summary`
/// notifications. Holds no per-user state.
pub struct SummaryService {
    sink: Arc<dyn NotificationSink>,
    config: InsightConfig,
}

impl SummaryService {
    pub fn new(sink: Arc<dyn NotificationSink>, config: InsightConfig) -> Self {
        SummaryService { sink, config }
    }

    fn build(
        &self,
        user_id: &str,
        period: SummaryPeriod,
        data: &PeriodData,
        previous: Option<&PreviousPeriod>,
        now: DateTime<Utc>,
    ) -> Result<FinancialSummary> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }

        let today = local_date(now, self.config.tz_or_utc());
        let (period_start, period_end) = match period {
            SummaryPeriod::Weekly => trailing_week(today),
            SummaryPeriod::Monthly => month_to_date(today),
        };

        let period_totals = totals(&data.income, &data.expenses);
        let top = top_categories(&period_totals.expenses_by_category, period.top_category_count());
        let message = compose_message(period, &period_totals, &top);
        let (period_change, goals) = match period {
            SummaryPeriod::Weekly => (None, Vec::new()),
            SummaryPeriod::Monthly => (
                previous.map(|p| changes(&period_totals, p)),
                goal_statuses(&data.goals),
            ),
        };

        let summary = FinancialSummary {
            user_id: user_id.to_string(),
            period,
            period_start,
            period_end,
            generated_at: now,
            total_income: period_totals.total_income,
            total_expenses: period_totals.total_expenses,
            net_cashflow: period_totals.net_cashflow,
            savings_rate: period_totals.savings_rate,
            top_spending_categories: top,
            income_breakdown: period_totals.income_breakdown,
            expenses_by_category: period_totals.expenses_by_category,
            changes: period_change,
            goals,
            message,
        };
        self.publish(&summary);
        Ok(summary)
    }

    fn publish(&self, summary: &FinancialSummary) {
        let title = match summary.period {
            SummaryPeriod::Weekly => "Your Weekly Financial Summary",
            SummaryPeriod::Monthly => "Your Monthly Financial Summary",
        };
        let payload = json!({
            "period": summary.period,
            "periodStart": summary.period_start,
            "periodEnd": summary.period_end,
            "totalIncome": summary.total_income,
            "totalExpenses": summary.total_expenses,
            "netCashflow": summary.net_cashflow,
            "savingsRate": summary.savings_rate,
            "topSpendingCategories": summary.top_spending_categories,
            "changes": summary.changes,
        });
        info!(
            "Generated {} summary for user {} (net {})",
            summary.period, summary.user_id, summary.net_cashflow
        );
        self.sink.notify(
            &summary.user_id,
            NewNotification::financial_summary(title, summary.message.clone(), payload),
        );
    }
}

impl SummaryServiceTrait for SummaryService {
    fn weekly(&self, user_id: &str, data: &PeriodData) -> Result<FinancialSummary> {
        self.weekly_at(user_id, data, Utc::now())
    }

    fn weekly_at(
        &self,
        user_id: &str,
        data: &PeriodData,
        now: DateTime<Utc>,
    ) -> Result<FinancialSummary> {
        self.build(user_id, SummaryPeriod::Weekly, data, None, now)
    }

    fn monthly(
        &self,
        user_id: &str,
        data: &PeriodData,
        previous: Option<&PreviousPeriod>,
    ) -> Result<FinancialSummary> {
        self.monthly_at(user_id, data, previous, Utc::now())
    }

    fn monthly_at(
        &self,
        user_id: &str,
        data: &PeriodData,
        previous: Option<&PreviousPeriod>,
        now: DateTime<Utc>,
    ) -> Result<FinancialSummary> {
        self.build(user_id, SummaryPeriod::Monthly, data, previous, now)
    }
}
