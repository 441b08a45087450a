//! In-memory storage implementation for Finsight.
//!
//! This crate implements the repository traits defined in `finsight-core` on
//! top of concurrent maps. Records cross a JSON boundary on every read and
//! write, the same way they would for a durable keyed store, so nothing in
//! core can depend on sharing mutable state with the store.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!   storage-memory (this crate)
//!                │
//!                ▼
//!        MemoryStore (DashMap)
//! ```

pub mod achievements;
pub mod errors;
pub mod notifications;
pub mod records;
pub mod scorecard;
pub mod store;
pub mod transactions;

pub use achievements::AchievementRepository;
pub use errors::{IntoCore, StorageError};
pub use notifications::NotificationRepository;
pub use records::{FinancialRecords, FinancialRecordsRepository, StoredSnapshotSource};
pub use scorecard::ScorecardRepository;
pub use store::MemoryStore;
pub use transactions::TransactionRepository;

// Re-export from finsight-core for convenience
pub use finsight_core::errors::{DatabaseError, Error, Result};
