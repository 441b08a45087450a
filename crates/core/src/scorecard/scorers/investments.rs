//! Investment health scorer.

use std::collections::HashSet;

use crate::scorecard::errors::ScorecardError;
use crate::scorecard::model::{CategoryScore, FinancialSnapshot, ScoreCategory};
use crate::scorecard::traits::{CategoryScorer, ScoringContext};

const MAX_POINTS: u32 = 15;
const RETIREMENT_POINTS: u32 = 5;

fn diversity_points(distinct_types: usize) -> u32 {
    match distinct_types {
        0 => 0,
        1 => 1,
        2 => 3,
        _ => 5,
    }
}

fn amount_points(total: f64) -> u32 {
    if total >= 10_000.0 {
        5
    } else if total >= 5_000.0 {
        3
    } else if total >= 1_000.0 {
        2
    } else if total > 0.0 {
        1
    } else {
        0
    }
}

pub struct InvestmentHealthScorer;

impl CategoryScorer for InvestmentHealthScorer {
    fn category(&self) -> ScoreCategory {
        ScoreCategory::InvestmentHealth
    }

    fn max_points(&self) -> u32 {
        MAX_POINTS
    }

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        _ctx: &ScoringContext,
    ) -> Result<CategoryScore, ScorecardError> {
        let investments = &snapshot.investments;
        if investments.is_empty() {
            return Ok(CategoryScore::new(
                self.category(),
                0,
                MAX_POINTS,
                vec!["No investments recorded".to_string()],
            ));
        }

        let types: HashSet<String> = investments
            .iter()
            .map(|i| i.investment_type.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let total: f64 = investments.iter().map(|i| i.amount.max(0.0)).sum();
        let has_retirement = investments.iter().any(|i| i.is_retirement());

        let mut details = vec![
            format!("{} investment type(s) held", types.len()),
            format!("${:.0} invested in total", total),
        ];
        let mut points = diversity_points(types.len()) + amount_points(total);
        if has_retirement {
            points += RETIREMENT_POINTS;
            details.push("Contributing to a retirement account".to_string());
        } else {
            details.push("No retirement account found".to_string());
        }

        Ok(CategoryScore::new(self.category(), points, MAX_POINTS, details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorecard::model::SnapshotInvestment;

    fn investment(name: &str, kind: &str, amount: f64) -> SnapshotInvestment {
        SnapshotInvestment {
            name: name.to_string(),
            investment_type: kind.to_string(),
            amount,
        }
    }

    fn ctx() -> ScoringContext {
        ScoringContext {
            savings_target: 30.0,
        }
    }

    #[test]
    fn test_diversified_with_retirement() {
        let snapshot = FinancialSnapshot {
            investments: vec![
                investment("Index fund", "ETF", 6000.0),
                investment("Company 401k", "Retirement", 5000.0),
                investment("Apple", "Stock", 500.0),
            ],
            ..Default::default()
        };
        let score = InvestmentHealthScorer.score(&snapshot, &ctx()).unwrap();
        assert_eq!(score.points, 15);
        assert_eq!(score.percentage, 100);
    }

    #[test]
    fn test_single_small_holding() {
        let snapshot = FinancialSnapshot {
            investments: vec![investment("Savings bond", "Bond", 800.0)],
            ..Default::default()
        };
        let score = InvestmentHealthScorer.score(&snapshot, &ctx()).unwrap();
        assert_eq!(score.points, 2);
        assert_eq!(score.percentage, 13);
    }

    #[test]
    fn test_none() {
        let score = InvestmentHealthScorer
            .score(&FinancialSnapshot::default(), &ctx())
            .unwrap();
        assert_eq!(score.points, 0);
    }
}
