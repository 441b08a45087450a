//! Expense control scorer.

use crate::constants::DEFAULT_EXPENSE_CATEGORY;
use crate::scorecard::errors::ScorecardError;
use crate::scorecard::model::{CategoryScore, FinancialSnapshot, ScoreCategory, SnapshotExpense};
use crate::scorecard::traits::{CategoryScorer, ScoringContext};

const MAX_POINTS: u32 = 15;
const CATEGORIZATION_POINTS: f64 = 5.0;
const BUDGET_POINTS: f64 = 10.0;

fn is_categorized(expense: &SnapshotExpense) -> bool {
    expense
        .category
        .as_deref()
        .map(str::trim)
        .map(|c| !c.is_empty() && !c.eq_ignore_ascii_case(DEFAULT_EXPENSE_CATEGORY))
        .unwrap_or(false)
}

fn spend_in(expenses: &[SnapshotExpense], category: &str) -> f64 {
    expenses
        .iter()
        .filter(|e| {
            e.category
                .as_deref()
                .map(|c| c.trim().eq_ignore_ascii_case(category.trim()))
                .unwrap_or(false)
        })
        .map(|e| e.amount.abs())
        .sum()
}

pub struct ExpenseControlScorer;

impl CategoryScorer for ExpenseControlScorer {
    fn category(&self) -> ScoreCategory {
        ScoreCategory::ExpenseControl
    }

    fn max_points(&self) -> u32 {
        MAX_POINTS
    }

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        _ctx: &ScoringContext,
    ) -> Result<CategoryScore, ScorecardError> {
        let expenses = &snapshot.expenses;
        let mut details = Vec::new();

        let categorization_points = if expenses.is_empty() {
            details.push("No expenses recorded".to_string());
            0
        } else {
            let categorized = expenses.iter().filter(|e| is_categorized(e)).count();
            let fraction = categorized as f64 / expenses.len() as f64;
            details.push(format!("{:.0}% of expenses categorized", fraction * 100.0));
            (fraction * CATEGORIZATION_POINTS).round() as u32
        };

        let budget_points = if snapshot.budgets.is_empty() {
            details.push("No budgets set".to_string());
            0
        } else {
            let under = snapshot
                .budgets
                .iter()
                .filter(|b| spend_in(expenses, &b.category) <= b.limit)
                .count();
            details.push(format!(
                "{} of {} budget(s) on track",
                under,
                snapshot.budgets.len()
            ));
            (under as f64 / snapshot.budgets.len() as f64 * BUDGET_POINTS).round() as u32
        };

        Ok(CategoryScore::new(
            self.category(),
            (categorization_points + budget_points).min(MAX_POINTS),
            MAX_POINTS,
            details,
        ))
    }
}
