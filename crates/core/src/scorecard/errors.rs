//! Scorecard error types.
//!
//! Every variant is caught at the service boundary and turned into a
//! degraded scorecard; none reaches the caller of `generate`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScorecardError {
    /// The financial snapshot could not be fetched.
    #[error("Financial data unavailable for user {user_id}: {message}")]
    SnapshotUnavailable { user_id: String, message: String },

    /// A snapshot field holds a value no score can be computed from.
    #[error("Invalid value for '{field}': {value}")]
    InvalidInput { field: String, value: String },

    /// A category produced a result outside its bounds.
    #[error("Scoring '{category}' failed: {message}")]
    Calculation { category: String, message: String },
}

impl ScorecardError {
    pub fn unavailable(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SnapshotUnavailable {
            user_id: user_id.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
        }
    }

    pub fn calculation(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Calculation {
            category: category.into(),
            message: message.into(),
        }
    }
}
