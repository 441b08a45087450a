//! Summaries module - weekly and monthly income/expense reports.

mod summaries_calculator;
mod summaries_model;
mod summaries_service;
mod summaries_traits;


pub use summaries_calculator::{percent_change, savings_rate};
pub use summaries_model::{
    ExpenseRecord, FinancialSummary, GoalStatus, IncomeRecord, NamedAmount, PeriodChange,
    PeriodData, PreviousPeriod, SummaryGoal, SummaryPeriod,
};
pub use summaries_service::SummaryService;
pub use summaries_traits::SummaryServiceTrait;
