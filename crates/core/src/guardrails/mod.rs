//! Guardrails module - per-category spending limits with approaching and
//! exceeded alerts over a rolling period.

mod guardrails_model;
mod guardrails_service;
mod guardrails_traits;


pub use guardrails_model::{
    AlertKind, GuardrailAlert, GuardrailState, GuardrailStatus, LimitPeriod, SpendingLimit,
    Transaction, TransactionOutcome,
};
pub use guardrails_service::{find_limit, period_window, GuardrailService};
pub use guardrails_traits::{GuardrailServiceTrait, TransactionRepositoryTrait};
