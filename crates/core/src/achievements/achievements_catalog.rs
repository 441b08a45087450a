//! The fixed achievement catalogue.
//!
//! `budget_mastery` and `account_milestone` entries have no evaluation rule
//! yet and can never be earned (see `evaluate_definition`).

use super::achievements_model::{AchievementDefinition, AchievementType};

/// Special-cased debt achievement: earned when debt reaches zero.
pub const DEBT_FREEDOM_ID: &str = "debt_freedom";

const fn def(
    id: &'static str,
    achievement_type: AchievementType,
    title: &'static str,
    description: &'static str,
    threshold: f64,
    milestone: bool,
) -> AchievementDefinition {
    AchievementDefinition {
        id,
        achievement_type,
        title,
        description,
        threshold,
        milestone,
    }
}

pub const ACHIEVEMENT_CATALOGUE: &[AchievementDefinition] = &[
    // Savings
    def(
        "first_savings",
        AchievementType::SavingsMilestone,
        "First Steps",
        "Save your first $100",
        100.0,
        false,
    ),
    def(
        "savings_1k",
        AchievementType::SavingsMilestone,
        "Four Figures",
        "Save a total of $1,000",
        1_000.0,
        true,
    ),
    def(
        "savings_5k",
        AchievementType::SavingsMilestone,
        "Building a Cushion",
        "Save a total of $5,000",
        5_000.0,
        false,
    ),
    def(
        "savings_10k",
        AchievementType::SavingsMilestone,
        "Five Figures",
        "Save a total of $10,000",
        10_000.0,
        true,
    ),
    def(
        "savings_25k",
        AchievementType::SavingsMilestone,
        "Serious Saver",
        "Save a total of $25,000",
        25_000.0,
        true,
    ),
    // Budget streaks
    def(
        "budget_streak_3",
        AchievementType::Streak,
        "On Track",
        "Stay under budget for 3 periods in a row",
        3.0,
        false,
    ),
    def(
        "budget_streak_6",
        AchievementType::Streak,
        "Steady Hand",
        "Stay under budget for 6 periods in a row",
        6.0,
        false,
    ),
    def(
        "budget_streak_12",
        AchievementType::Streak,
        "Budget Marathon",
        "Stay under budget for 12 periods in a row",
        12.0,
        true,
    ),
    def(
        "budget_master",
        AchievementType::BudgetMastery,
        "Budget Master",
        "Keep every budget category under its limit for a month",
        1.0,
        true,
    ),
    // Income
    def(
        "income_growth_10",
        AchievementType::IncomeGrowth,
        "Raising the Bar",
        "Grow your monthly income by 10%",
        10.0,
        false,
    ),
    def(
        "income_growth_25",
        AchievementType::IncomeGrowth,
        "Level Up",
        "Grow your monthly income by 25%",
        25.0,
        true,
    ),
    // Debt
    def(
        "debt_reduction_25",
        AchievementType::DebtReduction,
        "Chipping Away",
        "Reduce your total debt by 25%",
        25.0,
        false,
    ),
    def(
        "debt_reduction_50",
        AchievementType::DebtReduction,
        "Halfway Free",
        "Reduce your total debt by 50%",
        50.0,
        true,
    ),
    def(
        DEBT_FREEDOM_ID,
        AchievementType::DebtReduction,
        "Debt Free",
        "Pay off all of your tracked debt",
        100.0,
        true,
    ),
    // Challenges
    def(
        "first_challenge",
        AchievementType::ChallengeComplete,
        "Challenger",
        "Complete your first savings challenge",
        1.0,
        false,
    ),
    def(
        "challenge_5",
        AchievementType::ChallengeComplete,
        "Challenge Champion",
        "Complete 5 savings challenges",
        5.0,
        true,
    ),
    // Account
    def(
        "account_anniversary",
        AchievementType::AccountMilestone,
        "One Year Strong",
        "Keep your account active for a full year",
        365.0,
        false,
    ),
    // Logins
    def(
        "login_streak_7",
        AchievementType::LoginStreak,
        "Week Warrior",
        "Check in 7 days in a row",
        7.0,
        false,
    ),
    def(
        "login_streak_30",
        AchievementType::LoginStreak,
        "Habit Formed",
        "Check in 30 days in a row",
        30.0,
        true,
    ),
];

/// Looks up a catalogue entry by id.
pub fn find_definition(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENT_CATALOGUE.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_ids_are_unique() {
        let ids: HashSet<&str> = ACHIEVEMENT_CATALOGUE.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENT_CATALOGUE.len());
        assert_eq!(ACHIEVEMENT_CATALOGUE.len(), 19);
    }

    #[test]
    fn test_thresholds_are_positive() {
        assert!(ACHIEVEMENT_CATALOGUE.iter().all(|d| d.threshold > 0.0));
    }

    #[test]
    fn test_find_definition() {
        let def = find_definition(DEBT_FREEDOM_ID).unwrap();
        assert_eq!(def.achievement_type, AchievementType::DebtReduction);
        assert!(def.milestone);
        assert!(find_definition("nope").is_none());
    }
}
