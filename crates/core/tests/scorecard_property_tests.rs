//! Property-based integration tests for the wellness scorecard.
//!
//! These tests verify that the scoring invariants hold across arbitrary
//! snapshots, using the `proptest` crate for random test case generation.

use chrono::{TimeZone, Utc};
use finsight_core::scorecard::{
    band_for, compute_scorecard, default_scorers, FinancialSnapshot, IncomeSplit, LimitUsage,
    SnapshotBudget, SnapshotDebt, SnapshotExpense, SnapshotGoal, SnapshotIncome,
    SnapshotInvestment,
};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_category() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Uncategorized".to_string())),
        Just(Some("Groceries".to_string())),
        Just(Some("Dining".to_string())),
        Just(Some("Rent".to_string())),
    ]
}

fn arb_income() -> impl Strategy<Value = SnapshotIncome> {
    (0.0f64..20_000.0, prop_oneof![Just("Salary"), Just("Freelance"), Just("Rental")]).prop_map(
        |(amount, source)| SnapshotIncome {
            amount,
            source: Some(source.to_string()),
            date: None,
        },
    )
}

fn arb_expense() -> impl Strategy<Value = SnapshotExpense> {
    (-10_000.0f64..10_000.0, arb_category()).prop_map(|(amount, category)| SnapshotExpense {
        amount,
        category,
        date: None,
    })
}

fn arb_goal() -> impl Strategy<Value = SnapshotGoal> {
    (
        proptest::option::of(-100.0f64..50_000.0),
        proptest::option::of(-100.0f64..80_000.0),
        any::<bool>(),
    )
        .prop_map(|(target, progress, completed)| SnapshotGoal {
            name: "Goal".to_string(),
            target,
            progress,
            completed,
        })
}

fn arb_debt() -> impl Strategy<Value = SnapshotDebt> {
    (-500.0f64..100_000.0, 0.0f64..35.0).prop_map(|(balance, interest_rate)| SnapshotDebt {
        name: "Debt".to_string(),
        balance,
        interest_rate,
    })
}

fn arb_investment() -> impl Strategy<Value = SnapshotInvestment> {
    (
        prop_oneof![Just("ETF"), Just("Stock"), Just("Bond"), Just("401k")],
        0.0f64..50_000.0,
    )
        .prop_map(|(kind, amount)| SnapshotInvestment {
            name: format!("{} holding", kind),
            investment_type: kind.to_string(),
            amount,
        })
}

fn arb_snapshot() -> impl Strategy<Value = FinancialSnapshot> {
    (
        proptest::collection::vec(arb_income(), 0..10),
        proptest::collection::vec(arb_expense(), 0..15),
        proptest::collection::vec(arb_goal(), 0..5),
        proptest::collection::vec(arb_debt(), 0..4),
        proptest::collection::vec(arb_investment(), 0..5),
        proptest::collection::vec(
            (arb_category(), 0.0f64..2_000.0).prop_map(|(c, limit)| SnapshotBudget {
                category: c.unwrap_or_default(),
                limit,
            }),
            0..4,
        ),
        proptest::collection::vec(
            (0.0f64..1_000.0, 0.0f64..2_000.0).prop_map(|(amount, spent)| LimitUsage {
                category: "Dining".to_string(),
                amount,
                spent,
            }),
            0..7,
        ),
        proptest::option::of((0.0f64..60.0).prop_map(|savings| IncomeSplit {
            needs: 50.0,
            wants: 50.0 - savings.min(50.0),
            savings,
        })),
    )
        .prop_map(
            |(income, expenses, goals, debts, investments, budgets, spending_limits, split)| {
                FinancialSnapshot {
                    income,
                    expenses,
                    goals,
                    debts,
                    investments,
                    budgets,
                    spending_limits,
                    income_split: split,
                }
            },
        )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every category stays within `0..=max_points`.
    #[test]
    fn prop_category_points_bounded(snapshot in arb_snapshot()) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let card = compute_scorecard("u1", &snapshot, &default_scorers(), 30.0, now).unwrap();
        for score in &card.category_scores {
            prop_assert!(score.points <= score.max_points, "{:?}", score);
            prop_assert!(score.percentage <= 100);
        }
    }

    /// `overall_score == round(100 * Σpoints / Σmax_points)` and lies in `[0, 100]`.
    #[test]
    fn prop_overall_score_formula(snapshot in arb_snapshot()) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let card = compute_scorecard("u1", &snapshot, &default_scorers(), 30.0, now).unwrap();
        let points: u32 = card.category_scores.iter().map(|s| s.points).sum();
        let max: u32 = card.category_scores.iter().map(|s| s.max_points).sum();
        let expected = (100.0 * f64::from(points) / f64::from(max)).round() as u32;
        prop_assert_eq!(card.overall_score, expected);
        prop_assert!(card.overall_score <= 100);
    }

    /// The reported band always matches the overall score, and advice is bounded.
    #[test]
    fn prop_band_and_advice_consistent(snapshot in arb_snapshot()) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let card = compute_scorecard("u1", &snapshot, &default_scorers(), 30.0, now).unwrap();
        prop_assert_eq!(card.score_level.as_str(), band_for(card.overall_score).level);
        prop_assert!(!card.recommendations.is_empty() && card.recommendations.len() <= 3);
        prop_assert!(card.insights.len() >= 2);
    }
}
