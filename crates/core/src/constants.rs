/// Fraction of a spending limit at which an "approaching" alert fires
pub const DEFAULT_APPROACHING_RATIO: f64 = 0.8;

/// Age after which a scorecard is considered stale
pub const SCORECARD_MAX_AGE_DAYS: i64 = 30;

/// Number of scorecards kept per user, newest first
pub const SCORECARD_HISTORY_LIMIT: usize = 6;

/// Number of income/debt history points kept per user for achievements
pub const STATS_HISTORY_LIMIT: usize = 12;

/// Savings target (percent of income) used when the user has no income split
pub const DEFAULT_SAVINGS_TARGET_PERCENT: f64 = 30.0;

/// Goal completion checkpoints, in ascending order
pub const GOAL_MILESTONES: [f64; 4] = [25.0, 50.0, 75.0, 100.0];

/// Category assigned to expenses the user never classified
pub const DEFAULT_EXPENSE_CATEGORY: &str = "Uncategorized";

/// Default timezone name for calendar-day and calendar-month boundaries
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Decimal precision for displayed percentages
pub const PERCENT_DISPLAY_PRECISION: u32 = 1;

/// Decimal precision for displayed money amounts
pub const MONEY_DISPLAY_PRECISION: u32 = 2;
