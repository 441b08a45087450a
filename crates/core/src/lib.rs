//! Finsight Core - Financial insight and alerting engine.
//!
//! This crate contains the insight producers (achievements, guardrails,
//! summaries, scorecards) and the notification service they report into.
//! It is storage-agnostic and defines repository traits that are implemented
//! by the `storage-memory` crate.

pub mod achievements;
pub mod config;
pub mod constants;
pub mod errors;
pub mod guardrails;
pub mod notifications;
pub mod scorecard;
pub mod summaries;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use config::InsightConfig;
