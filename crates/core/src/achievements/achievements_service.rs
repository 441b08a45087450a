use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use serde_json::json;
use std::sync::Arc;

use super::achievements_catalog::ACHIEVEMENT_CATALOGUE;
use super::achievements_evaluator::{
    advance_login_streak, apply_update, evaluate, goal_milestone_crossed,
};
use super::achievements_model::{
    AchievementDefinition, AchievementEntry, AchievementStats, AchievementSummary,
    GoalProgressUpdate, HistoryPoint, StatsUpdate, UserAchievementState,
};
use super::achievements_traits::{AchievementRepositoryTrait, AchievementServiceTrait};
use crate::config::InsightConfig;
use crate::errors::Result;
use crate::notifications::{NewNotification, NotificationSink};
use crate::utils::time_utils::local_date;
use crate::utils::user_locks::{acquire, UserLocks};

pub struct AchievementService {
    repository: Arc<dyn AchievementRepositoryTrait>,
    sink: Arc<dyn NotificationSink>,
    config: InsightConfig,
    locks: UserLocks,
}

impl AchievementService {
    pub fn new(
        repository: Arc<dyn AchievementRepositoryTrait>,
        sink: Arc<dyn NotificationSink>,
        config: InsightConfig,
    ) -> Self {
        AchievementService {
            repository,
            sink,
            config,
            locks: UserLocks::new(),
        }
    }

    fn load_or_seed(&self, user_id: &str) -> Result<UserAchievementState> {
        Ok(self
            .repository
            .load_state(user_id)?
            .unwrap_or_else(|| UserAchievementState::seeded(user_id, ACHIEVEMENT_CATALOGUE)))
    }

    /// Mutates stats, evaluates and persists under the user lock, then
    /// announces newly earned achievements outside of it.
    fn mutate_and_evaluate<F>(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        mutate: F,
    ) -> Result<(AchievementStats, Vec<AchievementDefinition>)>
    where
        F: FnOnce(&mut AchievementStats),
    {
        let evaluation = {
            let handle = self.locks.handle(user_id);
            let _guard = acquire(&handle);

            let mut state = self.load_or_seed(user_id)?;
            mutate(&mut state.stats);
            let evaluation = evaluate(&state, ACHIEVEMENT_CATALOGUE, now);
            self.repository.save_state(evaluation.state.clone())?;
            evaluation
        };

        for def in &evaluation.newly_earned {
            self.announce(user_id, def, now);
        }
        Ok((evaluation.state.stats, evaluation.newly_earned))
    }

    fn announce(&self, user_id: &str, def: &AchievementDefinition, earned_at: DateTime<Utc>) {
        info!("User {} earned achievement '{}'", user_id, def.id);
        let notification = NewNotification::achievement(
            format!("Achievement Unlocked: {}", def.title),
            def.description,
            json!({
                "achievementId": def.id,
                "achievementType": def.achievement_type.as_str(),
                "milestone": def.milestone,
                "earnedAt": earned_at,
            }),
        )
        .with_email(def.milestone);
        self.sink.notify(user_id, notification);
    }

    fn entries(state: &UserAchievementState) -> (Vec<AchievementEntry>, Vec<AchievementEntry>) {
        let mut earned = Vec::new();
        let mut in_progress = Vec::new();
        for def in ACHIEVEMENT_CATALOGUE {
            let progress = state.achievements.get(def.id).cloned().unwrap_or_default();
            let entry = AchievementEntry {
                definition: *def,
                progress: progress.progress,
                earned_at: progress.earned_at,
            };
            if progress.earned {
                earned.push(entry);
            } else {
                in_progress.push(entry);
            }
        }
        in_progress.sort_by(|a, b| b.progress.total_cmp(&a.progress));
        (earned, in_progress)
    }
}

impl AchievementServiceTrait for AchievementService {
    fn initialize(&self, user_id: &str) -> Result<UserAchievementState> {
        let handle = self.locks.handle(user_id);
        let _guard = acquire(&handle);

        if let Some(existing) = self.repository.load_state(user_id)? {
            return Ok(existing);
        }
        let state = UserAchievementState::seeded(user_id, ACHIEVEMENT_CATALOGUE);
        self.repository.save_state(state.clone())?;
        debug!("Seeded achievement state for user {}", user_id);
        Ok(state)
    }

    fn get_state(&self, user_id: &str) -> Result<UserAchievementState> {
        self.initialize(user_id)
    }

    fn evaluate(
        &self,
        user_id: &str,
        update: Option<StatsUpdate>,
    ) -> Result<Vec<AchievementDefinition>> {
        self.evaluate_at(user_id, update, Utc::now())
    }

    fn evaluate_at(
        &self,
        user_id: &str,
        update: Option<StatsUpdate>,
        now: DateTime<Utc>,
    ) -> Result<Vec<AchievementDefinition>> {
        let cap = self.config.stats_history_limit;
        let (_, earned) = self.mutate_and_evaluate(user_id, now, |stats| {
            if let Some(update) = &update {
                apply_update(stats, update, cap);
            }
        })?;
        Ok(earned)
    }

    fn update_login_streak(&self, user_id: &str) -> Result<u32> {
        self.update_login_streak_at(user_id, Utc::now())
    }

    fn update_login_streak_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<u32> {
        let today = local_date(now, self.config.tz_or_utc());
        let (stats, _) = self.mutate_and_evaluate(user_id, now, |stats| {
            advance_login_streak(stats, today);
        })?;
        Ok(stats.login_streak)
    }

    fn update_budget_streak(&self, user_id: &str, under_budget: bool) -> Result<u32> {
        let (stats, _) = self.mutate_and_evaluate(user_id, Utc::now(), |stats| {
            if under_budget {
                stats.budget_streak += 1;
            } else {
                stats.budget_streak = 0;
            }
        })?;
        Ok(stats.budget_streak)
    }

    fn complete_challenge(&self, user_id: &str) -> Result<u32> {
        let (stats, _) = self.mutate_and_evaluate(user_id, Utc::now(), |stats| {
            stats.completed_challenges += 1;
        })?;
        Ok(stats.completed_challenges)
    }

    fn record_savings(&self, user_id: &str, amount: f64) -> Result<Vec<AchievementDefinition>> {
        self.evaluate(
            user_id,
            Some(StatsUpdate {
                savings_delta: Some(amount),
                ..Default::default()
            }),
        )
    }

    fn record_income(
        &self,
        user_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<Vec<AchievementDefinition>> {
        self.evaluate(
            user_id,
            Some(StatsUpdate {
                income: Some(HistoryPoint::new(date, amount)),
                ..Default::default()
            }),
        )
    }

    fn record_debt(
        &self,
        user_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<Vec<AchievementDefinition>> {
        self.evaluate(
            user_id,
            Some(StatsUpdate {
                debt: Some(HistoryPoint::new(date, amount)),
                ..Default::default()
            }),
        )
    }

    fn track_goal_progress(&self, user_id: &str, goal: &GoalProgressUpdate) -> bool {
        if goal.target <= 0.0 {
            debug!("Ignoring goal '{}' without a positive target", goal.name);
            return false;
        }
        let current_pct = goal.current * 100.0 / goal.target;
        let previous_pct = goal.previous_amount.unwrap_or(0.0) * 100.0 / goal.target;

        let Some(milestone) = goal_milestone_crossed(previous_pct, current_pct) else {
            return false;
        };

        let completed = milestone >= 100.0;
        let message = if completed {
            format!("Congratulations! You've reached your {} goal!", goal.name)
        } else {
            format!("You're {}% of the way to your {} goal.", milestone, goal.name)
        };
        let notification = NewNotification::goal_progress(
            format!("Goal Milestone: {}", goal.name),
            message,
            json!({
                "goalName": goal.name,
                "milestone": milestone,
                "current": goal.current,
                "target": goal.target,
                "percentage": current_pct,
            }),
        )
        .with_email(completed);
        self.sink.notify(user_id, notification);
        info!(
            "Goal '{}' for user {} crossed the {}% milestone",
            goal.name, user_id, milestone
        );
        true
    }

    fn get_summary(&self, user_id: &str) -> Result<AchievementSummary> {
        let state = self.get_state(user_id)?;
        let (earned, in_progress) = Self::entries(&state);
        Ok(AchievementSummary {
            stats: state.stats,
            earned,
            in_progress,
        })
    }
}
