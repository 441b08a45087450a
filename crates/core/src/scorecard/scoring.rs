//! Scorecard computation over a validated snapshot.

use chrono::{DateTime, Utc};
use log::debug;

use super::advice::{band_for, build_insights, build_recommendations};
use super::errors::ScorecardError;
use super::model::{CategoryScore, FinancialSnapshot, ScoreCard};
use super::traits::{CategoryScorer, ScoringContext};

fn finite(field: String, value: f64) -> Result<(), ScorecardError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScorecardError::invalid_input(field, value))
    }
}

/// Rejects snapshots carrying NaN or infinite amounts.
pub fn validate_snapshot(snapshot: &FinancialSnapshot) -> Result<(), ScorecardError> {
    for (i, r) in snapshot.income.iter().enumerate() {
        finite(format!("income[{}].amount", i), r.amount)?;
    }
    for (i, r) in snapshot.expenses.iter().enumerate() {
        finite(format!("expenses[{}].amount", i), r.amount)?;
    }
    for (i, g) in snapshot.goals.iter().enumerate() {
        finite(format!("goals[{}].target", i), g.target.unwrap_or(0.0))?;
        finite(format!("goals[{}].progress", i), g.progress.unwrap_or(0.0))?;
    }
    for (i, d) in snapshot.debts.iter().enumerate() {
        finite(format!("debts[{}].balance", i), d.balance)?;
        finite(format!("debts[{}].interestRate", i), d.interest_rate)?;
    }
    for (i, inv) in snapshot.investments.iter().enumerate() {
        finite(format!("investments[{}].amount", i), inv.amount)?;
    }
    for (i, b) in snapshot.budgets.iter().enumerate() {
        finite(format!("budgets[{}].limit", i), b.limit)?;
    }
    for (i, l) in snapshot.spending_limits.iter().enumerate() {
        finite(format!("spendingLimits[{}].amount", i), l.amount)?;
        finite(format!("spendingLimits[{}].spent", i), l.spent)?;
    }
    if let Some(split) = &snapshot.income_split {
        finite("incomeSplit.savings".to_string(), split.savings)?;
    }
    Ok(())
}

/// `round(100 * Σpoints / Σmax_points)`; zero when nothing is scored.
pub fn overall_score(scores: &[CategoryScore]) -> u32 {
    let points: u32 = scores.iter().map(|s| s.points).sum();
    let max: u32 = scores.iter().map(|s| s.max_points).sum();
    if max == 0 {
        return 0;
    }
    (f64::from(points) * 100.0 / f64::from(max)).round() as u32
}

/// Savings target from the snapshot's income split, else `fallback`.
pub fn savings_target(snapshot: &FinancialSnapshot, fallback: f64) -> f64 {
    snapshot
        .income_split
        .map(|split| split.savings)
        .filter(|savings| *savings > 0.0)
        .unwrap_or(fallback)
}

pub fn compute_scorecard(
    user_id: &str,
    snapshot: &FinancialSnapshot,
    scorers: &[Box<dyn CategoryScorer>],
    default_savings_target: f64,
    now: DateTime<Utc>,
) -> Result<ScoreCard, ScorecardError> {
    validate_snapshot(snapshot)?;
    let ctx = ScoringContext {
        savings_target: savings_target(snapshot, default_savings_target),
    };

    let mut category_scores = Vec::with_capacity(scorers.len());
    for scorer in scorers {
        let score = scorer.score(snapshot, &ctx)?;
        if score.points > score.max_points || score.max_points != scorer.max_points() {
            return Err(ScorecardError::calculation(
                scorer.category().as_str(),
                format!("{} of {} points", score.points, score.max_points),
            ));
        }
        debug!(
            "Scored {} for user {}: {}/{}",
            score.category, user_id, score.points, score.max_points
        );
        category_scores.push(score);
    }

    let overall = overall_score(&category_scores);
    let band = band_for(overall);
    Ok(ScoreCard {
        user_id: user_id.to_string(),
        generated_at: now,
        overall_score: overall,
        recommendations: build_recommendations(&category_scores),
        insights: build_insights(snapshot, &category_scores, ctx.savings_target),
        category_scores,
        score_level: band.level.to_string(),
        score_color: band.color.to_string(),
        score_description: band.description.to_string(),
        degraded: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorecard::model::{
        IncomeSplit, ScoreCategory, SnapshotDebt, SnapshotExpense, SnapshotIncome,
    };
    use crate::scorecard::scorers::default_scorers;

    struct OverflowingScorer;

    impl CategoryScorer for OverflowingScorer {
        fn category(&self) -> ScoreCategory {
            ScoreCategory::GoalProgress
        }

        fn max_points(&self) -> u32 {
            10
        }

        fn score(
            &self,
            _snapshot: &FinancialSnapshot,
            _ctx: &ScoringContext,
        ) -> Result<CategoryScore, ScorecardError> {
            Ok(CategoryScore::new(self.category(), 12, 10, Vec::new()))
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_overall_score_formula() {
        let scores = vec![
            CategoryScore::new(ScoreCategory::IncomeStability, 9, 20, Vec::new()),
            CategoryScore::new(ScoreCategory::DebtManagement, 15, 15, Vec::new()),
        ];
        // 24 / 35 = 68.57
        assert_eq!(overall_score(&scores), 69);
        assert_eq!(overall_score(&[]), 0);
    }

    #[test]
    fn test_empty_snapshot_scores_debt_only() {
        let card = compute_scorecard(
            "u1",
            &FinancialSnapshot::default(),
            &default_scorers(),
            30.0,
            now(),
        )
        .unwrap();
        assert_eq!(card.category_scores.len(), 7);
        assert_eq!(card.overall_score, 15);
        assert_eq!(card.score_level, "Needs Attention");
        assert_eq!(card.recommendations.len(), 3);
        assert_eq!(card.insights[0].title, "Strength: Debt Management");
        assert!(!card.degraded);
    }

    #[test]
    fn test_income_split_overrides_default_target() {
        let snapshot = FinancialSnapshot {
            income_split: Some(IncomeSplit {
                needs: 50.0,
                wants: 30.0,
                savings: 20.0,
            }),
            ..Default::default()
        };
        assert_eq!(savings_target(&snapshot, 30.0), 20.0);
        assert_eq!(savings_target(&FinancialSnapshot::default(), 30.0), 30.0);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let snapshot = FinancialSnapshot {
            income: vec![SnapshotIncome {
                amount: 1000.0,
                source: None,
                date: None,
            }],
            expenses: vec![SnapshotExpense {
                amount: 10.0,
                category: None,
                date: None,
            }],
            debts: vec![SnapshotDebt {
                name: "Card".to_string(),
                balance: f64::INFINITY,
                interest_rate: 19.9,
            }],
            ..Default::default()
        };
        let err = compute_scorecard("u1", &snapshot, &default_scorers(), 30.0, now()).unwrap_err();
        assert!(matches!(
            err,
            ScorecardError::InvalidInput { ref field, .. } if field == "debts[0].balance"
        ));
    }

    #[test]
    fn test_out_of_bounds_points_fail_calculation() {
        let scorers: Vec<Box<dyn CategoryScorer>> = vec![Box::new(OverflowingScorer)];
        let err = compute_scorecard("u1", &FinancialSnapshot::default(), &scorers, 30.0, now())
            .unwrap_err();
        assert!(matches!(err, ScorecardError::Calculation { .. }));
    }
}
