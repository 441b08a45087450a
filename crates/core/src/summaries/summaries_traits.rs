use chrono::{DateTime, Utc};

use super::summaries_model::{FinancialSummary, PeriodData, PreviousPeriod};
use crate::errors::Result;

/// Trait for periodic summary generation.
pub trait SummaryServiceTrait: Send + Sync {
    fn weekly(&self, user_id: &str, data: &PeriodData) -> Result<FinancialSummary>;
    fn weekly_at(
        &self,
        user_id: &str,
        data: &PeriodData,
        now: DateTime<Utc>,
    ) -> Result<FinancialSummary>;
    fn monthly(
        &self,
        user_id: &str,
        data: &PeriodData,
        previous: Option<&PreviousPeriod>,
    ) -> Result<FinancialSummary>;
    fn monthly_at(
        &self,
        user_id: &str,
        data: &PeriodData,
        previous: Option<&PreviousPeriod>,
        now: DateTime<Utc>,
    ) -> Result<FinancialSummary>;
}
