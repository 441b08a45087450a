//! Category scorer implementations.
//!
//! One scorer per weighted category; weights sum to 100:
//! - Income stability (20)
//! - Savings ratio (20)
//! - Investment health (15)
//! - Debt management (15)
//! - Expense control (15)
//! - Goal progress (10)
//! - Guardrails usage (5)

pub mod debt;
pub mod expenses;
pub mod goals;
pub mod guardrails;
pub mod income;
pub mod investments;
pub mod savings;

pub use debt::DebtManagementScorer;
pub use expenses::ExpenseControlScorer;
pub use goals::GoalProgressScorer;
pub use guardrails::GuardrailsUsageScorer;
pub use income::IncomeStabilityScorer;
pub use investments::InvestmentHealthScorer;
pub use savings::SavingsRatioScorer;

use super::traits::CategoryScorer;

/// The seven scorers in report order.
pub fn default_scorers() -> Vec<Box<dyn CategoryScorer>> {
    vec![
        Box::new(IncomeStabilityScorer),
        Box::new(SavingsRatioScorer),
        Box::new(InvestmentHealthScorer),
        Box::new(DebtManagementScorer),
        Box::new(ExpenseControlScorer),
        Box::new(GoalProgressScorer),
        Box::new(GuardrailsUsageScorer),
    ]
}
