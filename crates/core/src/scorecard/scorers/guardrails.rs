//! Guardrails usage scorer.

use crate::scorecard::errors::ScorecardError;
use crate::scorecard::model::{CategoryScore, FinancialSnapshot, ScoreCategory};
use crate::scorecard::traits::{CategoryScorer, ScoringContext};

const MAX_POINTS: u32 = 5;

fn coverage_points(limits: usize) -> u32 {
    match limits {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        _ => 3,
    }
}

fn adherence_points(fraction_within: f64) -> u32 {
    if fraction_within >= 0.9 {
        2
    } else if fraction_within >= 0.7 {
        1
    } else {
        0
    }
}

pub struct GuardrailsUsageScorer;

impl CategoryScorer for GuardrailsUsageScorer {
    fn category(&self) -> ScoreCategory {
        ScoreCategory::GuardrailsUsage
    }

    fn max_points(&self) -> u32 {
        MAX_POINTS
    }

    fn score(
        &self,
        snapshot: &FinancialSnapshot,
        _ctx: &ScoringContext,
    ) -> Result<CategoryScore, ScorecardError> {
        let limits = &snapshot.spending_limits;
        if limits.is_empty() {
            return Ok(CategoryScore::new(
                self.category(),
                0,
                MAX_POINTS,
                vec!["No spending limits configured".to_string()],
            ));
        }

        let within = limits.iter().filter(|l| !l.is_exceeded()).count();
        let fraction = within as f64 / limits.len() as f64;
        let details = vec![
            format!("{} spending limit(s) configured", limits.len()),
            format!("{} of {} limit(s) not exceeded", within, limits.len()),
        ];
        let points = coverage_points(limits.len()) + adherence_points(fraction);
        Ok(CategoryScore::new(self.category(), points, MAX_POINTS, details))
    }
}
