//! Engine configuration.
//!
//! Every field has a default so hosts can deserialize a partial document or
//! rely on environment overrides only.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_APPROACHING_RATIO, DEFAULT_SAVINGS_TARGET_PERCENT, DEFAULT_TIMEZONE,
    SCORECARD_HISTORY_LIMIT, SCORECARD_MAX_AGE_DAYS, STATS_HISTORY_LIMIT,
};
use crate::errors::{Error, Result, ValidationError};

/// Tunables shared by all producers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightConfig {
    /// IANA timezone used for calendar-day and calendar-month boundaries
    pub timezone: String,
    /// Fraction of a limit at which the "approaching" alert fires
    pub approaching_ratio: f64,
    pub scorecard_max_age_days: i64,
    pub scorecard_history_limit: usize,
    pub stats_history_limit: usize,
    /// Savings target (percent of income) when the snapshot carries none
    pub default_savings_target: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            approaching_ratio: DEFAULT_APPROACHING_RATIO,
            scorecard_max_age_days: SCORECARD_MAX_AGE_DAYS,
            scorecard_history_limit: SCORECARD_HISTORY_LIMIT,
            stats_history_limit: STATS_HISTORY_LIMIT,
            default_savings_target: DEFAULT_SAVINGS_TARGET_PERCENT,
        }
    }
}

impl InsightConfig {
    /// Builds a configuration from defaults overlaid with `FINSIGHT_*`
    /// environment variables, then validates it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`InsightConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(tz) = lookup("FINSIGHT_TIMEZONE") {
            config.timezone = tz;
        }
        if let Some(ratio) = lookup("FINSIGHT_APPROACHING_RATIO") {
            config.approaching_ratio =
                ratio.trim().parse::<f64>().map_err(ValidationError::from)?;
        }
        if let Some(days) = lookup("FINSIGHT_SCORECARD_MAX_AGE_DAYS") {
            config.scorecard_max_age_days =
                days.trim().parse::<i64>().map_err(ValidationError::from)?;
        }
        if let Some(limit) = lookup("FINSIGHT_SCORECARD_HISTORY_LIMIT") {
            config.scorecard_history_limit =
                limit.trim().parse::<usize>().map_err(ValidationError::from)?;
        }
        if let Some(limit) = lookup("FINSIGHT_STATS_HISTORY_LIMIT") {
            config.stats_history_limit =
                limit.trim().parse::<usize>().map_err(ValidationError::from)?;
        }
        if let Some(target) = lookup("FINSIGHT_DEFAULT_SAVINGS_TARGET") {
            config.default_savings_target =
                target.trim().parse::<f64>().map_err(ValidationError::from)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and that the timezone is a known IANA zone.
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if !(self.approaching_ratio > 0.0 && self.approaching_ratio <= 1.0) {
            return Err(Error::InvalidConfigValue(format!(
                "approachingRatio must be in (0, 1], got {}",
                self.approaching_ratio
            )));
        }
        if self.scorecard_max_age_days < 0 {
            return Err(Error::InvalidConfigValue(
                "scorecardMaxAgeDays must not be negative".to_string(),
            ));
        }
        if self.scorecard_history_limit == 0 || self.stats_history_limit == 0 {
            return Err(Error::InvalidConfigValue(
                "history limits must be at least 1".to_string(),
            ));
        }
        if !self.default_savings_target.is_finite() || self.default_savings_target <= 0.0 {
            return Err(Error::InvalidConfigValue(format!(
                "defaultSavingsTarget must be positive, got {}",
                self.default_savings_target
            )));
        }
        Ok(())
    }

    /// Parsed timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            Error::InvalidConfigValue(format!("Unknown timezone '{}'", self.timezone))
        })
    }

    /// Parsed timezone, falling back to UTC for an invalid name.
    pub fn tz_or_utc(&self) -> Tz {
        self.tz().unwrap_or(chrono_tz::UTC)
    }
}
