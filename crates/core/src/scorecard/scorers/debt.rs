//! Debt management scorer.
//!
//! Starts from full marks and deducts for the debt-to-income ratio and for
//! the share of debt carried at a high interest rate.

use crate::scorecard::errors::ScorecardError;
use crate::scorecard::model::{CategoryScore, FinancialSnapshot, ScoreCategory};
use crate::scorecard::traits::{CategoryScorer, ScoringContext};

const MAX_POINTS: u32 = 15;
/// Estimated monthly payment as a fraction of the outstanding balance
const MONTHLY_SERVICE_RATE: f64 = 0.03;
/// Annual rate (percent) above which debt counts as high-interest
const HIGH_INTEREST_RATE: f64 = 10.0;

fn dti_penalty(dti: f64) -> u32 {
    if dti > 40.0 {
        10
    } else if dti > 30.0 {
        7
    } else if dti > 20.0 {
        4
    } else if dti > 0.0 {
        2
    } else {
        0
    }
}

fn high_interest_penalty(share: f64) -> u32 {
    if share > 50.0 {
        5
    } else if share > 20.0 {
        3
    } else if share > 0.0 {
        1
    } else {
        0
    }
}

/// Average income per recorded period.
fn monthly_income(snapshot: &FinancialSnapshot) -> f64 {
    if snapshot.income.is_empty() {
        return 0.0;
    }
    let total: f64 = snapshot.income.iter().map(|r| r.amount).sum();
    total / snapshot.income.len() as f64
}

pub struct DebtManagementScorer;

impl CategoryScorer for DebtManagementScorer {
    fn category(&self) -> ScoreCategory {
        ScoreCategory::DebtManagement
    }

    fn max_points(&self) -> u32 {
        MAX_POINTS
    }

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        _ctx: &ScoringContext,
    ) -> Result<CategoryScore, ScorecardError> {
        let total_debt: f64 = snapshot.debts.iter().map(|d| d.balance.max(0.0)).sum();
        if total_debt <= 0.0 {
            return Ok(CategoryScore::new(
                self.category(),
                MAX_POINTS,
                MAX_POINTS,
                vec!["No outstanding debt".to_string()],
            ));
        }

        let mut details = Vec::new();
        let income = monthly_income(snapshot);
        let dti_deduction = if income > 0.0 {
            let dti = total_debt * MONTHLY_SERVICE_RATE / income * 100.0;
            details.push(format!("Estimated debt-to-income ratio of {:.1}%", dti));
            dti_penalty(dti)
        } else {
            details.push("Debt outstanding with no income recorded".to_string());
            10
        };

        let high_interest: f64 = snapshot
            .debts
            .iter()
            .filter(|d| d.interest_rate > HIGH_INTEREST_RATE)
            .map(|d| d.balance.max(0.0))
            .sum();
        let share = high_interest / total_debt * 100.0;
        if share > 0.0 {
            details.push(format!("{:.0}% of debt is above 10% interest", share));
        } else {
            details.push("No high-interest debt".to_string());
        }

        let points = MAX_POINTS.saturating_sub(dti_deduction + high_interest_penalty(share));
        Ok(CategoryScore::new(self.category(), points, MAX_POINTS, details))
    }
}
