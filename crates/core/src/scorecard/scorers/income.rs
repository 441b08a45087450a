//! Income stability scorer.
//!
//! Rewards a long income history, growth between the first and latest
//! period, and more than one income source.

use std::collections::HashSet;

use crate::scorecard::errors::ScorecardError;
use crate::scorecard::model::{CategoryScore, FinancialSnapshot, ScoreCategory, SnapshotIncome};
use crate::scorecard::traits::{CategoryScorer, ScoringContext};

const MAX_POINTS: u32 = 20;
const POINTS_PER_PERIOD: u32 = 2;
const TRACKED_PERIOD_CAP: usize = 6;
const SOURCE_CAP: usize = 3;
/// Points for flat income; growth earns one more per 10%, decline loses one
const FLAT_GROWTH_POINTS: f64 = 4.0;
const MAX_GROWTH_POINTS: f64 = 5.0;

/// Percent change from the first to the latest income record.
///
/// `None` with fewer than two records or a non-positive first amount.
pub fn income_growth_percent(income: &[SnapshotIncome]) -> Option<f64> {
    if income.len() < 2 {
        return None;
    }
    let first = income.first()?.amount;
    let last = income.last()?.amount;
    if first <= 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

fn growth_points(growth: Option<f64>) -> u32 {
    let Some(growth) = growth else {
        return 0;
    };
    let step = (growth / 10.0).floor();
    let points = if growth > 0.0 {
        (FLAT_GROWTH_POINTS + step).clamp(FLAT_GROWTH_POINTS, MAX_GROWTH_POINTS)
    } else if growth < 0.0 {
        (FLAT_GROWTH_POINTS + step).max(0.0)
    } else {
        FLAT_GROWTH_POINTS
    };
    points as u32
}

fn distinct_sources(income: &[SnapshotIncome]) -> usize {
    income
        .iter()
        .filter_map(|r| r.source.as_deref())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

pub struct IncomeStabilityScorer;

impl CategoryScorer for IncomeStabilityScorer {
    fn category(&self) -> ScoreCategory {
        ScoreCategory::IncomeStability
    }

    fn max_points(&self) -> u32 {
        MAX_POINTS
    }

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        _ctx: &ScoringContext,
    ) -> Result<CategoryScore, ScorecardError> {
        let income = &snapshot.income;
        let periods = income.len();
        let period_points = periods.min(TRACKED_PERIOD_CAP) as u32 * POINTS_PER_PERIOD;

        let growth = income_growth_percent(income);
        let sources = distinct_sources(income);
        let source_points = sources.min(SOURCE_CAP) as u32;

        let mut details = vec![format!("{} income period(s) tracked", periods)];
        details.push(match growth {
            Some(g) if g > 0.0 => format!("Income grew {:.1}% since the first period", g),
            Some(g) if g < 0.0 => format!("Income fell {:.1}% since the first period", g.abs()),
            Some(_) => "Income has held steady".to_string(),
            None => "Not enough income history to measure growth".to_string(),
        });
        details.push(format!("{} distinct income source(s)", sources));

        let points = period_points + growth_points(growth) + source_points;
        Ok(CategoryScore::new(
            self.category(),
            points.min(MAX_POINTS),
            MAX_POINTS,
            details,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income(amount: f64, source: &str) -> SnapshotIncome {
        SnapshotIncome {
            amount,
            source: Some(source.to_string()),
            date: None,
        }
    }

    fn ctx() -> ScoringContext {
        ScoringContext {
            savings_target: 30.0,
        }
    }

    #[test]
    fn test_growth_points_tiers() {
        assert_eq!(growth_points(None), 0);
        assert_eq!(growth_points(Some(0.0)), 4);
        assert_eq!(growth_points(Some(3.0)), 4);
        assert_eq!(growth_points(Some(12.0)), 5);
        assert_eq!(growth_points(Some(80.0)), 5);
        assert_eq!(growth_points(Some(-5.0)), 3);
        assert_eq!(growth_points(Some(-25.0)), 1);
        assert_eq!(growth_points(Some(-90.0)), 0);
    }

    #[test]
    fn test_full_marks() {
        let snapshot = FinancialSnapshot {
            income: vec![
                income(3000.0, "Salary"),
                income(3000.0, "Salary"),
                income(200.0, "Freelance"),
                income(3100.0, "salary"),
                income(150.0, "Dividends"),
                income(3000.0, "Salary"),
                income(3400.0, "Salary"),
            ],
            ..Default::default()
        };
        let score = IncomeStabilityScorer.score(&snapshot, &ctx()).unwrap();
        assert_eq!(score.points, 20);
        assert_eq!(score.percentage, 100);
        assert_eq!(score.details[0], "7 income period(s) tracked");
    }

    #[test]
    fn test_empty_history() {
        let score = IncomeStabilityScorer
            .score(&FinancialSnapshot::default(), &ctx())
            .unwrap();
        assert_eq!(score.points, 0);
        assert_eq!(score.percentage, 0);
    }

    #[test]
    fn test_flat_single_source() {
        let snapshot = FinancialSnapshot {
            income: vec![income(2000.0, "Salary"), income(2000.0, "Salary")],
            ..Default::default()
        };
        let score = IncomeStabilityScorer.score(&snapshot, &ctx()).unwrap();
        // 2 periods * 2 + flat 4 + 1 source
        assert_eq!(score.points, 9);
        assert_eq!(score.percentage, 45);
    }
}
