//! Savings ratio scorer.

use crate::scorecard::errors::ScorecardError;
use crate::scorecard::model::{CategoryScore, FinancialSnapshot, ScoreCategory};
use crate::scorecard::traits::{CategoryScorer, ScoringContext};

const MAX_POINTS: u32 = 20;

/// `(income - expenses) / income * 100`, `None` without positive income.
pub fn savings_ratio(snapshot: &FinancialSnapshot) -> Option<f64> {
    let total_income: f64 = snapshot.income.iter().map(|r| r.amount).sum();
    if total_income <= 0.0 {
        return None;
    }
    let total_expenses: f64 = snapshot.expenses.iter().map(|r| r.amount.abs()).sum();
    Some((total_income - total_expenses) / total_income * 100.0)
}

fn ratio_points(ratio: f64, target: f64) -> u32 {
    if ratio >= target {
        MAX_POINTS
    } else if ratio >= target * 0.75 {
        16
    } else if ratio >= target * 0.5 {
        12
    } else if ratio > 0.0 {
        8
    } else {
        0
    }
}

pub struct SavingsRatioScorer;

impl CategoryScorer for SavingsRatioScorer {
    fn category(&self) -> ScoreCategory {
        ScoreCategory::SavingsRatio
    }

    fn max_points(&self) -> u32 {
        MAX_POINTS
    }

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        ctx: &ScoringContext,
    ) -> Result<CategoryScore, ScorecardError> {
        let target = ctx.savings_target;
        let (points, details) = match savings_ratio(snapshot) {
            Some(ratio) => (
                ratio_points(ratio, target),
                vec![format!(
                    "Saving {:.1}% of income against a {:.0}% target",
                    ratio, target
                )],
            ),
            None => (
                0,
                vec!["No income recorded to measure savings against".to_string()],
            ),
        };
        Ok(CategoryScore::new(self.category(), points, MAX_POINTS, details))
    }
}
