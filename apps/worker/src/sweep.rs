//! One pull-based sweep over every known user.
//!
//! Per user: achievement re-evaluation, guardrail `check_all` against the
//! stored limits, scorecard regeneration when stale, and optionally a
//! periodic summary. A failing step is logged and the sweep moves on.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use finsight_core::achievements::AchievementServiceTrait;
use finsight_core::guardrails::{GuardrailAlert, GuardrailServiceTrait};
use finsight_core::notifications::{Notification, NotificationServiceTrait};
use finsight_core::scorecard::ScorecardServiceTrait;
use finsight_core::summaries::{SummaryPeriod, SummaryServiceTrait};
use finsight_core::utils::time_utils::{local_date, month_to_date, trailing_week};

use crate::config::WorkerConfig;
use crate::main_lib::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReport {
    pub user_id: String,
    pub alerts: Vec<GuardrailAlert>,
    pub overall_score: Option<u32>,
    pub score_level: Option<String>,
    pub unread_count: usize,
    pub notifications: Vec<Notification>,
}

pub async fn run(state: &AppState, config: &WorkerConfig, now: DateTime<Utc>) -> Vec<UserReport> {
    let users = state.store.known_users();
    info!("Sweeping {} users", users.len());

    let mut reports = Vec::with_capacity(users.len());
    for user_id in users {
        reports.push(sweep_user(state, config, &user_id, now).await);
    }
    reports
}

async fn sweep_user(
    state: &AppState,
    config: &WorkerConfig,
    user_id: &str,
    now: DateTime<Utc>,
) -> UserReport {
    match state
        .achievement_service
        .evaluate_at(user_id, None, now)
    {
        Ok(earned) if !earned.is_empty() => {
            info!("{} achievements earned by {}", earned.len(), user_id)
        }
        Ok(_) => {}
        Err(e) => warn!("Achievement evaluation failed for {}: {}", user_id, e),
    }

    let limits = match state.records.load(user_id) {
        Ok(records) => records.map(|r| r.spending_limits).unwrap_or_default(),
        Err(e) => {
            warn!("Could not load records for {}: {}", user_id, e);
            Vec::new()
        }
    };
    let alerts = match state.guardrail_service.check_all_at(user_id, &limits, now) {
        Ok(alerts) => alerts,
        Err(e) => {
            warn!("Guardrail check failed for {}: {}", user_id, e);
            Vec::new()
        }
    };

    let mut overall_score = None;
    let mut score_level = None;
    if config.run_scorecards {
        match state
            .scorecard_service
            .generate_if_stale_at(user_id, now)
            .await
        {
            Ok(card) => {
                overall_score = Some(card.overall_score);
                score_level = Some(card.score_level);
            }
            Err(e) => warn!("Scorecard generation failed for {}: {}", user_id, e),
        }
    }

    if let Some(period) = config.summary {
        run_summary(state, user_id, period, now);
    }

    let notifications = state
        .notification_service
        .list_all(user_id)
        .unwrap_or_else(|e| {
            warn!("Could not list notifications for {}: {}", user_id, e);
            Vec::new()
        });
    let unread_count = notifications.iter().filter(|n| !n.read).count();
    debug!("{} has {} unread notifications", user_id, unread_count);

    UserReport {
        user_id: user_id.to_string(),
        alerts,
        overall_score,
        score_level,
        unread_count,
        notifications,
    }
}

fn run_summary(state: &AppState, user_id: &str, period: SummaryPeriod, now: DateTime<Utc>) {
    let today = local_date(now, state.config.tz_or_utc());
    let (start, end) = match period {
        SummaryPeriod::Weekly => trailing_week(today),
        SummaryPeriod::Monthly => month_to_date(today),
    };
    let data = match state
        .records
        .period_data(user_id, &state.transactions, start, end)
    {
        Ok(data) => data,
        Err(e) => {
            warn!("Could not collect {} data for {}: {}", period, user_id, e);
            return;
        }
    };
    let result = match period {
        SummaryPeriod::Weekly => state.summary_service.weekly_at(user_id, &data, now),
        SummaryPeriod::Monthly => state
            .summary_service
            .monthly_at(user_id, &data, None, now),
    };
    if let Err(e) = result {
        warn!("{} summary failed for {}: {}", period, user_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{load, FixtureFile};
    use crate::main_lib::build_state;
    use chrono::TimeZone;
    use finsight_core::notifications::NotificationType;
    use finsight_core::InsightConfig;
    use std::path::PathBuf;

    fn fixtures() -> FixtureFile {
        serde_json::from_str(
            r#"{
            "users": [
                {
                    "userId": "bob",
                    "records": {
                        "income": [{"amount": 3000, "source": "Salary", "date": "2024-06-01"}],
                        "spendingLimits": [
                            {"category": "Dining", "amount": 100, "period": "monthly"}
                        ]
                    },
                    "transactions": [
                        {"category": "Dining", "amount": -150, "date": "2024-06-05"}
                    ]
                },
                {
                    "userId": "carol",
                    "transactions": [
                        {"category": "Groceries", "amount": -40, "date": "2024-06-10"}
                    ]
                }
            ]
        }"#,
        )
        .unwrap()
    }

    fn worker_config(summary: Option<SummaryPeriod>) -> WorkerConfig {
        WorkerConfig {
            fixtures_path: PathBuf::from("unused.json"),
            summary,
            run_scorecards: true,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 8, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_sweep_reports_every_user() {
        let state = build_state(InsightConfig::default());
        load(&state, fixtures()).unwrap();

        let reports = run(&state, &worker_config(None), now()).await;
        assert_eq!(reports.len(), 2);

        let bob = &reports[0];
        assert_eq!(bob.user_id, "bob");
        assert_eq!(bob.alerts.len(), 1);
        assert!(bob.overall_score.is_some());
        assert!(bob
            .notifications
            .iter()
            .any(|n| n.notification_type == NotificationType::SpendingAlert));
        assert_eq!(bob.unread_count, bob.notifications.len());

        let carol = &reports[1];
        assert!(carol.alerts.is_empty());
        assert!(carol.overall_score.is_some());
    }

    #[tokio::test]
    async fn test_second_sweep_reuses_fresh_scorecards() {
        let state = build_state(InsightConfig::default());
        load(&state, fixtures()).unwrap();
        run(&state, &worker_config(None), now()).await;
        run(&state, &worker_config(None), now()).await;

        let history = state.scorecard_service.get_history("bob").unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_weekly_summary_is_published() {
        let state = build_state(InsightConfig::default());
        load(&state, fixtures()).unwrap();
        let reports = run(&state, &worker_config(Some(SummaryPeriod::Weekly)), now()).await;

        for report in reports {
            assert!(report
                .notifications
                .iter()
                .any(|n| n.notification_type == NotificationType::FinancialSummary));
        }
    }
}
