//! Pure achievement evaluation.
//!
//! Nothing here touches storage or notifications: every function takes the
//! current state by reference and returns the next one, so transitions can be
//! tested in isolation and the service only has to persist and announce.

use chrono::{DateTime, NaiveDate, Utc};

use super::achievements_catalog::DEBT_FREEDOM_ID;
use super::achievements_model::{
    AchievementDefinition, AchievementStats, AchievementType, HistoryPoint, StatsUpdate,
    UserAchievementState,
};
use crate::constants::GOAL_MILESTONES;
use crate::utils::time_utils::calendar_days_between;

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub state: UserAchievementState,
    /// Definitions that transitioned to earned in this pass, catalogue order
    pub newly_earned: Vec<AchievementDefinition>,
}

fn ratio_progress(value: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (value * 100.0 / threshold).clamp(0.0, 100.0)
}

fn push_capped(history: &mut Vec<HistoryPoint>, point: HistoryPoint, cap: usize) {
    history.push(point);
    if history.len() > cap {
        let excess = history.len() - cap;
        history.drain(..excess);
    }
}

/// Merges stat deltas into `stats`; histories keep the newest `history_cap` points.
pub fn apply_update(stats: &mut AchievementStats, update: &StatsUpdate, history_cap: usize) {
    if let Some(delta) = update.savings_delta {
        stats.total_saved += delta;
    }
    if let Some(point) = update.income {
        push_capped(&mut stats.monthly_income_history, point, history_cap);
    }
    if let Some(point) = update.debt {
        push_capped(&mut stats.debt_history, point, history_cap);
    }
}

/// Updates the login streak for a check-in on `today`.
///
/// Same calendar day: unchanged. Next calendar day: +1. Any longer gap (or
/// first login): reset to 1. Returns whether anything changed.
pub fn advance_login_streak(stats: &mut AchievementStats, today: NaiveDate) -> bool {
    match stats.last_login {
        Some(last) => {
            let gap = calendar_days_between(last, today);
            if gap <= 0 {
                return false;
            }
            if gap == 1 {
                stats.login_streak += 1;
            } else {
                stats.login_streak = 1;
            }
        }
        None => stats.login_streak = 1,
    }
    stats.last_login = Some(today);
    true
}

/// Computes `(progress, achieved)` for one definition against `stats`.
pub fn evaluate_definition(def: &AchievementDefinition, stats: &AchievementStats) -> (f64, bool) {
    let counter = |value: f64| (ratio_progress(value, def.threshold), value >= def.threshold);

    match def.achievement_type {
        AchievementType::SavingsMilestone => counter(stats.total_saved),
        AchievementType::Streak => counter(f64::from(stats.budget_streak)),
        AchievementType::ChallengeComplete => counter(f64::from(stats.completed_challenges)),
        AchievementType::LoginStreak => counter(f64::from(stats.login_streak)),
        AchievementType::IncomeGrowth => {
            let history = &stats.monthly_income_history;
            let (Some(oldest), Some(latest)) = (history.first(), history.last()) else {
                return (0.0, false);
            };
            if history.len() < 2 {
                return (0.0, false);
            }
            let growth = if oldest.amount <= 0.0 {
                0.0
            } else {
                (latest.amount - oldest.amount) * 100.0 / oldest.amount
            };
            (ratio_progress(growth, def.threshold), growth >= def.threshold)
        }
        AchievementType::DebtReduction => {
            let history = &stats.debt_history;
            let (Some(initial), Some(current)) = (history.first(), history.last()) else {
                return (0.0, false);
            };
            if history.len() < 2 {
                return (0.0, false);
            }
            let (initial, current) = (initial.amount, current.amount);
            if def.id == DEBT_FREEDOM_ID {
                if initial <= 0.0 {
                    return (0.0, false);
                }
                let progress = (100.0 - current * 100.0 / initial).clamp(0.0, 100.0);
                return (progress, current <= 0.0);
            }
            let reduction = if initial <= 0.0 {
                0.0
            } else {
                (initial - current) * 100.0 / initial
            };
            (
                ratio_progress(reduction, def.threshold),
                reduction >= def.threshold,
            )
        }
        // No rule defined: these stay unearned.
        AchievementType::BudgetMastery | AchievementType::AccountMilestone => (0.0, false),
    }
}

/// Walks the catalogue and returns the next state plus newly earned entries.
///
/// Already-earned entries are skipped untouched, so `earned` never regresses.
pub fn evaluate(
    state: &UserAchievementState,
    catalogue: &[AchievementDefinition],
    now: DateTime<Utc>,
) -> Evaluation {
    let mut next = state.clone();
    let mut newly_earned = Vec::new();

    for def in catalogue {
        let entry = next.achievements.entry(def.id.to_string()).or_default();
        if entry.earned {
            continue;
        }
        let (progress, achieved) = evaluate_definition(def, &next.stats);
        entry.progress = progress;
        if achieved {
            entry.earned = true;
            entry.progress = 100.0;
            entry.earned_at = Some(now);
            newly_earned.push(*def);
        }
    }

    Evaluation {
        state: next,
        newly_earned,
    }
}

/// First goal checkpoint crossed when moving from `previous_pct` to `current_pct`.
pub fn goal_milestone_crossed(previous_pct: f64, current_pct: f64) -> Option<f64> {
    GOAL_MILESTONES
        .iter()
        .copied()
        .find(|&m| previous_pct < m && m <= current_pct)
}
