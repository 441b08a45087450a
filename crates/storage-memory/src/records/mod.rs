//! Financial records kept per user and the snapshot source built on them.

mod model;
mod repository;
mod snapshot;

pub use model::{
    BudgetRecord, DebtRecord, FinancialRecords, GoalRecord, IncomeEntry, InvestmentRecord,
};
pub use repository::FinancialRecordsRepository;
pub use snapshot::StoredSnapshotSource;
