#[cfg(test)]
mod tests {
    use crate::achievements::{
        AchievementRepositoryTrait, AchievementService, AchievementServiceTrait,
        GoalProgressUpdate, StatsUpdate, UserAchievementState, ACHIEVEMENT_CATALOGUE,
    };
    use crate::config::InsightConfig;
    use crate::errors::Result;
    use crate::notifications::{MockNotificationSink, NotificationPriority, NotificationType};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    #[derive(Default)]
    struct MockAchievementRepository {
        states: RwLock<HashMap<String, UserAchievementState>>,
    }

    impl AchievementRepositoryTrait for MockAchievementRepository {
        fn load_state(&self, user_id: &str) -> Result<Option<UserAchievementState>> {
            Ok(self.states.read().unwrap().get(user_id).cloned())
        }

        fn save_state(&self, state: UserAchievementState) -> Result<()> {
            self.states
                .write()
                .unwrap()
                .insert(state.user_id.clone(), state);
            Ok(())
        }
    }

    fn setup() -> (AchievementService, MockNotificationSink) {
        setup_with_config(InsightConfig::default())
    }

    fn setup_with_config(config: InsightConfig) -> (AchievementService, MockNotificationSink) {
        let sink = MockNotificationSink::new();
        let service = AchievementService::new(
            Arc::new(MockAchievementRepository::default()),
            Arc::new(sink.clone()),
            config,
        );
        (service, sink)
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (svc, _) = setup();
        let first = svc.initialize("u1").unwrap();
        assert_eq!(first.achievements.len(), ACHIEVEMENT_CATALOGUE.len());

        svc.record_savings("u1", 50.0).unwrap();
        let second = svc.initialize("u1").unwrap();
        assert_eq!(second.stats.total_saved, 50.0);
    }

    #[test]
    fn test_savings_achievement_notifies_with_milestone_email() {
        let (svc, sink) = setup();
        let earned = svc.record_savings("u1", 1200.0).unwrap();
        let ids: Vec<&str> = earned.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["first_savings", "savings_1k"]);

        let published = sink.for_user("u1");
        assert_eq!(published.len(), 2);
        assert!(published
            .iter()
            .all(|n| n.notification_type == NotificationType::Achievement));
        assert_eq!(published[0].priority, Some(NotificationPriority::Medium));
        // first_savings is minor, savings_1k is a milestone
        assert!(!published[0].channels.unwrap().send_email);
        assert!(published[1].channels.unwrap().send_email);
        assert_eq!(published[1].payload.as_ref().unwrap()["achievementId"], "savings_1k");
    }

    #[test]
    fn test_repeated_evaluation_does_not_renotify() {
        let (svc, sink) = setup();
        svc.record_savings("u1", 150.0).unwrap();
        svc.evaluate("u1", None).unwrap();
        svc.evaluate("u1", Some(StatsUpdate::default())).unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_budget_streak_resets_and_keeps_earned() {
        let (svc, _) = setup();
        for _ in 0..3 {
            svc.update_budget_streak("u1", true).unwrap();
        }
        assert!(svc.get_state("u1").unwrap().is_earned("budget_streak_3"));

        assert_eq!(svc.update_budget_streak("u1", false).unwrap(), 0);
        assert_eq!(svc.update_budget_streak("u1", true).unwrap(), 1);
        assert!(svc.get_state("u1").unwrap().is_earned("budget_streak_3"));
    }

    #[test]
    fn test_login_streak_day_boundaries() {
        let (svc, _) = setup();
        assert_eq!(svc.update_login_streak_at("u1", at(2024, 3, 1, 8)).unwrap(), 1);
        // Same day, later hour
        assert_eq!(svc.update_login_streak_at("u1", at(2024, 3, 1, 23)).unwrap(), 1);
        // Next day, fewer than 24h later
        assert_eq!(svc.update_login_streak_at("u1", at(2024, 3, 2, 1)).unwrap(), 2);
        // Two-day gap resets
        assert_eq!(svc.update_login_streak_at("u1", at(2024, 3, 4, 12)).unwrap(), 1);
    }

    #[test]
    fn test_login_streak_uses_configured_timezone() {
        let config = InsightConfig {
            timezone: "America/New_York".to_string(),
            ..Default::default()
        };
        let (svc, _) = setup_with_config(config);
        // 01:00 and 04:00 UTC on March 2nd are both still March 1st in New York
        svc.update_login_streak_at("u1", at(2024, 3, 2, 1)).unwrap();
        assert_eq!(svc.update_login_streak_at("u1", at(2024, 3, 2, 4)).unwrap(), 1);
        assert_eq!(svc.update_login_streak_at("u1", at(2024, 3, 2, 12)).unwrap(), 2);
    }

    #[test]
    fn test_login_streak_of_seven_earns_achievement() {
        let (svc, sink) = setup();
        for day in 1..=7 {
            svc.update_login_streak_at("u1", at(2024, 5, day, 9)).unwrap();
        }
        assert!(svc.get_state("u1").unwrap().is_earned("login_streak_7"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_complete_challenge() {
        let (svc, _) = setup();
        assert_eq!(svc.complete_challenge("u1").unwrap(), 1);
        assert!(svc.get_state("u1").unwrap().is_earned("first_challenge"));
    }

    #[test]
    fn test_debt_freedom_through_service() {
        let (svc, sink) = setup();
        svc.record_debt("u1", date(2024, 1, 1), 5000.0).unwrap();
        let earned = svc.record_debt("u1", date(2024, 6, 1), 0.0).unwrap();
        let ids: Vec<&str> = earned.iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec!["debt_reduction_25", "debt_reduction_50", "debt_freedom"]
        );
        let state = svc.get_state("u1").unwrap();
        assert_eq!(state.achievements["debt_freedom"].progress, 100.0);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_income_history_capped_at_configured_limit() {
        let (svc, _) = setup();
        for month in 1..=12 {
            svc.record_income("u1", date(2023, month, 1), 1000.0).unwrap();
        }
        svc.record_income("u1", date(2024, 1, 1), 1300.0).unwrap();
        let state = svc.get_state("u1").unwrap();
        assert_eq!(state.stats.monthly_income_history.len(), 12);
        assert_eq!(state.stats.monthly_income_history[0].date, date(2023, 2, 1));
        assert!(state.is_earned("income_growth_25"));
    }

    #[test]
    fn test_goal_progress_fires_single_milestone() {
        let (svc, sink) = setup();
        let goal = GoalProgressUpdate {
            name: "Vacation".to_string(),
            target: 2000.0,
            current: 1600.0,
            previous_amount: Some(1000.0),
        };
        assert!(svc.track_goal_progress("u1", &goal));

        let published = sink.for_user("u1");
        assert_eq!(published.len(), 1);
        let payload = published[0].payload.as_ref().unwrap();
        assert_eq!(payload["milestone"], 75.0);
        assert!(!published[0].channels.unwrap().send_email);
    }

    #[test]
    fn test_goal_completion_is_emailed() {
        let (svc, sink) = setup();
        let goal = GoalProgressUpdate {
            name: "Car".to_string(),
            target: 1000.0,
            current: 1000.0,
            previous_amount: Some(900.0),
        };
        assert!(svc.track_goal_progress("u1", &goal));
        assert!(sink.for_user("u1")[0].channels.unwrap().send_email);
    }

    #[test]
    fn test_goal_progress_without_crossing_is_silent() {
        let (svc, sink) = setup();
        let goal = GoalProgressUpdate {
            name: "Car".to_string(),
            target: 1000.0,
            current: 300.0,
            previous_amount: Some(260.0),
        };
        assert!(!svc.track_goal_progress("u1", &goal));

        let zero_target = GoalProgressUpdate {
            target: 0.0,
            ..goal
        };
        assert!(!svc.track_goal_progress("u1", &zero_target));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_summary_partitions_and_sorts() {
        let (svc, _) = setup();
        svc.record_savings("u1", 2500.0).unwrap();
        svc.update_login_streak_at("u1", at(2024, 1, 1, 9)).unwrap();

        let summary = svc.get_summary("u1").unwrap();
        let earned: Vec<&str> = summary.earned.iter().map(|e| e.definition.id).collect();
        assert_eq!(earned, vec!["first_savings", "savings_1k"]);
        assert_eq!(
            summary.earned.len() + summary.in_progress.len(),
            ACHIEVEMENT_CATALOGUE.len()
        );
        assert_eq!(summary.in_progress[0].definition.id, "savings_5k");
        assert!(summary
            .in_progress
            .windows(2)
            .all(|w| w[0].progress >= w[1].progress));
        assert_eq!(summary.stats.total_saved, 2500.0);
    }
}
