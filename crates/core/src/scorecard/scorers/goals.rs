//! Goal progress scorer.

use crate::scorecard::errors::ScorecardError;
use crate::scorecard::model::{CategoryScore, FinancialSnapshot, ScoreCategory};
use crate::scorecard::traits::{CategoryScorer, ScoringContext};

const MAX_POINTS: u32 = 10;

fn active_points(active: usize) -> u32 {
    if active >= 3 {
        4
    } else if active > 0 {
        2
    } else {
        0
    }
}

fn completion_points(average: f64) -> u32 {
    if average >= 75.0 {
        6
    } else if average >= 50.0 {
        4
    } else if average >= 25.0 {
        2
    } else if average > 0.0 {
        1
    } else {
        0
    }
}

/// Mean completion percentage over goals with a positive target and a
/// recorded progress amount, each capped at 100.
pub fn average_completion(snapshot: &FinancialSnapshot) -> Option<f64> {
    let completions: Vec<f64> = snapshot
        .goals
        .iter()
        .filter_map(|g| match (g.target, g.progress) {
            (Some(target), Some(progress)) if target > 0.0 => {
                Some((progress / target * 100.0).clamp(0.0, 100.0))
            }
            _ => None,
        })
        .collect();
    if completions.is_empty() {
        return None;
    }
    Some(completions.iter().sum::<f64>() / completions.len() as f64)
}

pub struct GoalProgressScorer;

impl CategoryScorer for GoalProgressScorer {
    fn category(&self) -> ScoreCategory {
        ScoreCategory::GoalProgress
    }

    fn max_points(&self) -> u32 {
        MAX_POINTS
    }

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        _ctx: &ScoringContext,
    ) -> Result<CategoryScore, ScorecardError> {
        let active = snapshot.goals.iter().filter(|g| !g.completed).count();
        let average = average_completion(snapshot);

        let mut details = vec![format!("{} active goal(s)", active)];
        details.push(match average {
            Some(avg) => format!("Goals are {:.0}% complete on average", avg),
            None => "No measurable goal progress yet".to_string(),
        });

        let points = active_points(active) + average.map(completion_points).unwrap_or(0);
        Ok(CategoryScore::new(self.category(), points, MAX_POINTS, details))
    }
}
