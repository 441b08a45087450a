//! Score bands, recommendations and insights derived from category scores.

use chrono::{DateTime, Utc};

use super::model::{
    CategoryScore, FinancialSnapshot, Insight, InsightType, Recommendation,
    RecommendationPriority, ScoreBand, ScoreCard, ScoreCategory,
};

pub const UNAVAILABLE_LEVEL: &str = "Unavailable";

/// Bands are user-facing copy; keep them stable.
pub const SCORE_BANDS: [ScoreBand; 5] = [
    ScoreBand {
        min: 90,
        max: 100,
        level: "Excellent",
        color: "green",
        description: "Outstanding financial health. Keep up the great habits.",
    },
    ScoreBand {
        min: 75,
        max: 89,
        level: "Strong",
        color: "teal",
        description: "Your finances are in strong shape with a few areas to polish.",
    },
    ScoreBand {
        min: 60,
        max: 74,
        level: "Good",
        color: "blue",
        description: "A solid foundation. Targeted improvements will raise your score.",
    },
    ScoreBand {
        min: 40,
        max: 59,
        level: "Fair",
        color: "orange",
        description: "Some areas need attention to strengthen your financial health.",
    },
    ScoreBand {
        min: 0,
        max: 39,
        level: "Needs Attention",
        color: "red",
        description: "Your finances need attention. Start with the recommendations below.",
    },
];

/// Categories below this percentage earn a recommendation.
const RECOMMENDATION_CUTOFF: u32 = 70;
const MAX_RECOMMENDATIONS: usize = 3;
/// Minimum number of income and expense records for trend insights
const TREND_WINDOW: usize = 3;

pub fn band_for(score: u32) -> ScoreBand {
    SCORE_BANDS
        .iter()
        .copied()
        .find(|band| score >= band.min && score <= band.max)
        .unwrap_or(SCORE_BANDS[0])
}

/// Percentage below which the urgent wording is used, with both wordings.
fn category_advice(category: ScoreCategory) -> (u32, &'static str, &'static str) {
    match category {
        ScoreCategory::IncomeStability => (
            50,
            "Your income is irregular. Track every pay period and look for a second income source to build stability.",
            "Keep tracking your income each period and consider diversifying your income sources.",
        ),
        ScoreCategory::SavingsRatio => (
            30,
            "You're saving little or nothing. Set up an automatic transfer to savings on payday, even if it's small.",
            "You're close to your savings target. Trim one discretionary category to close the gap.",
        ),
        ScoreCategory::InvestmentHealth => (
            40,
            "Start investing regularly, beginning with a retirement account such as a 401k or IRA.",
            "Broaden your investments across more asset types to improve diversification.",
        ),
        ScoreCategory::DebtManagement => (
            50,
            "Your debt load is high. Prioritise paying down high-interest balances first.",
            "Keep reducing your debt and avoid adding new high-interest balances.",
        ),
        ScoreCategory::ExpenseControl => (
            40,
            "Categorize your expenses and set budgets for your biggest spending categories.",
            "Review the budgets you're exceeding and adjust your spending or your limits.",
        ),
        ScoreCategory::GoalProgress => (
            40,
            "Set at least one concrete savings goal and contribute to it every month.",
            "Increase contributions to the goals furthest from completion.",
        ),
        ScoreCategory::GuardrailsUsage => (
            40,
            "Set spending limits on your most frequent expense categories to catch overspending early.",
            "Add limits to more categories and keep an eye on the ones you've exceeded.",
        ),
        ScoreCategory::General | ScoreCategory::System => (
            0,
            "Review your finances regularly.",
            "Review your finances regularly.",
        ),
    }
}

/// Up to three recommendations for the weakest categories, padded with
/// general advice.
pub fn build_recommendations(scores: &[CategoryScore]) -> Vec<Recommendation> {
    let mut weakest: Vec<&CategoryScore> = scores
        .iter()
        .filter(|s| s.percentage < RECOMMENDATION_CUTOFF)
        .collect();
    weakest.sort_by_key(|s| s.percentage);

    let mut recommendations: Vec<Recommendation> = weakest
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|score| {
            let (urgent_below, urgent, moderate) = category_advice(score.category);
            let (text, priority) = if score.percentage < urgent_below {
                (urgent, RecommendationPriority::High)
            } else {
                (moderate, RecommendationPriority::Medium)
            };
            Recommendation {
                category: score.category,
                text: text.to_string(),
                priority,
            }
        })
        .collect();

    if recommendations.len() < MAX_RECOMMENDATIONS {
        recommendations.push(Recommendation {
            category: ScoreCategory::General,
            text: "Schedule a monthly review of your budget, goals and spending limits."
                .to_string(),
            priority: RecommendationPriority::Low,
        });
    }
    if recommendations.len() < MAX_RECOMMENDATIONS {
        recommendations.push(Recommendation {
            category: ScoreCategory::General,
            text: "Build an emergency fund covering three to six months of expenses."
                .to_string(),
            priority: RecommendationPriority::Low,
        });
    }
    recommendations
}

/// Percent change across the last three values, `None` when the window is
/// too short or starts at zero.
fn trailing_trend(values: &[f64]) -> Option<f64> {
    if values.len() < TREND_WINDOW {
        return None;
    }
    let window = &values[values.len() - TREND_WINDOW..];
    let start = window[0];
    let end = window[TREND_WINDOW - 1];
    if start <= 0.0 {
        return None;
    }
    Some((end - start) / start * 100.0)
}

pub fn build_insights(
    snapshot: &FinancialSnapshot,
    scores: &[CategoryScore],
    savings_target: f64,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    // First category wins ties
    let best = scores
        .iter()
        .reduce(|best, s| if s.percentage > best.percentage { s } else { best });
    if let Some(best) = best {
        insights.push(Insight {
            title: format!("Strength: {}", best.name),
            text: best
                .details
                .first()
                .cloned()
                .unwrap_or_else(|| format!("{} is your strongest area.", best.name)),
            insight_type: InsightType::Positive,
        });
    }

    if snapshot.income.len() >= TREND_WINDOW && snapshot.expenses.len() >= TREND_WINDOW {
        let income: Vec<f64> = snapshot.income.iter().map(|r| r.amount).collect();
        let expenses: Vec<f64> = snapshot.expenses.iter().map(|r| r.amount.abs()).collect();

        if let Some(trend) = trailing_trend(&income) {
            if trend > 5.0 {
                insights.push(Insight {
                    title: "Income is trending up".to_string(),
                    text: format!("Your income rose {:.1}% over the last three periods.", trend),
                    insight_type: InsightType::Positive,
                });
            } else if trend < -5.0 {
                insights.push(Insight {
                    title: "Income is trending down".to_string(),
                    text: format!(
                        "Your income fell {:.1}% over the last three periods.",
                        trend.abs()
                    ),
                    insight_type: InsightType::Negative,
                });
            }
        }
        if let Some(trend) = trailing_trend(&expenses) {
            if trend > 10.0 {
                insights.push(Insight {
                    title: "Spending is rising".to_string(),
                    text: format!(
                        "Your expenses grew {:.1}% over the last three periods.",
                        trend
                    ),
                    insight_type: InsightType::Negative,
                });
            } else if trend < -5.0 {
                insights.push(Insight {
                    title: "Spending is easing".to_string(),
                    text: format!(
                        "Your expenses dropped {:.1}% over the last three periods.",
                        trend.abs()
                    ),
                    insight_type: InsightType::Positive,
                });
            }
        }
    }

    insights.push(Insight {
        title: "Savings target".to_string(),
        text: format!("Your target is to save {:.0}% of your income.", savings_target),
        insight_type: InsightType::Neutral,
    });
    insights
}

/// Fallback returned when a scorecard cannot be computed.
pub fn degraded_scorecard(user_id: &str, now: DateTime<Utc>, reason: &str) -> ScoreCard {
    ScoreCard {
        user_id: user_id.to_string(),
        generated_at: now,
        overall_score: 0,
        category_scores: Vec::new(),
        recommendations: vec![Recommendation {
            category: ScoreCategory::System,
            text: format!(
                "We couldn't calculate your financial wellness score ({}). Please try again later.",
                reason
            ),
            priority: RecommendationPriority::High,
        }],
        insights: Vec::new(),
        score_level: UNAVAILABLE_LEVEL.to_string(),
        score_color: "gray".to_string(),
        score_description: "Your score is temporarily unavailable.".to_string(),
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorecard::model::{SnapshotExpense, SnapshotIncome};

    fn score(category: ScoreCategory, points: u32, max: u32) -> CategoryScore {
        CategoryScore::new(category, points, max, vec![format!("{} detail", category)])
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_for(100).level, "Excellent");
        assert_eq!(band_for(90).level, "Excellent");
        assert_eq!(band_for(89).level, "Strong");
        assert_eq!(band_for(75).level, "Strong");
        assert_eq!(band_for(74).level, "Good");
        assert_eq!(band_for(60).level, "Good");
        assert_eq!(band_for(59).level, "Fair");
        assert_eq!(band_for(40).level, "Fair");
        assert_eq!(band_for(39).level, "Needs Attention");
        assert_eq!(band_for(0).level, "Needs Attention");
    }

    #[test]
    fn test_recommendations_target_weakest_categories() {
        let scores = vec![
            score(ScoreCategory::IncomeStability, 20, 20),
            score(ScoreCategory::SavingsRatio, 8, 20),
            score(ScoreCategory::InvestmentHealth, 0, 15),
            score(ScoreCategory::DebtManagement, 10, 15),
            score(ScoreCategory::ExpenseControl, 8, 15),
            score(ScoreCategory::GoalProgress, 10, 10),
        ];
        let recs = build_recommendations(&scores);
        let categories: Vec<ScoreCategory> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                ScoreCategory::InvestmentHealth,
                ScoreCategory::SavingsRatio,
                ScoreCategory::ExpenseControl
            ]
        );
        // savings at 40% is above its 30% urgent cutoff
        assert_eq!(recs[0].priority, RecommendationPriority::High);
        assert_eq!(recs[1].priority, RecommendationPriority::Medium);
        assert_eq!(recs[2].priority, RecommendationPriority::Medium);
    }

    #[test]
    fn test_recommendations_padded_with_general_advice() {
        let strong = vec![score(ScoreCategory::IncomeStability, 20, 20)];
        let recs = build_recommendations(&strong);
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.category == ScoreCategory::General));

        let one_weak = vec![score(ScoreCategory::GoalProgress, 2, 10)];
        let recs = build_recommendations(&one_weak);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].category, ScoreCategory::GoalProgress);
    }

    #[test]
    fn test_insights_with_trends() {
        let income = [3000.0, 3000.0, 3300.0]
            .iter()
            .map(|&amount| SnapshotIncome {
                amount,
                source: None,
                date: None,
            })
            .collect();
        let expenses = [1000.0, 1100.0, 1200.0]
            .iter()
            .map(|&amount| SnapshotExpense {
                amount: -amount,
                category: None,
                date: None,
            })
            .collect();
        let snapshot = FinancialSnapshot {
            income,
            expenses,
            ..Default::default()
        };
        let scores = vec![
            score(ScoreCategory::SavingsRatio, 12, 20),
            score(ScoreCategory::DebtManagement, 15, 15),
        ];
        let insights = build_insights(&snapshot, &scores, 25.0);
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].title, "Strength: Debt Management");
        assert_eq!(insights[0].text, "debt_management detail");
        assert_eq!(insights[1].insight_type, InsightType::Positive);
        assert_eq!(insights[2].insight_type, InsightType::Negative);
        assert_eq!(insights[3].insight_type, InsightType::Neutral);
        assert_eq!(insights[3].text, "Your target is to save 25% of your income.");
    }

    #[test]
    fn test_degraded_scorecard() {
        let card = degraded_scorecard("u1", Utc::now(), "data unavailable");
        assert_eq!(card.overall_score, 0);
        assert_eq!(card.score_level, UNAVAILABLE_LEVEL);
        assert_eq!(card.recommendations.len(), 1);
        assert_eq!(card.recommendations[0].category, ScoreCategory::System);
        assert_eq!(card.recommendations[0].priority, RecommendationPriority::High);
        assert!(card.degraded);
    }
}
