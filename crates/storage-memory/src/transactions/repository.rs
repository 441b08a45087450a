//! Transaction repository implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use finsight_core::guardrails::{Transaction, TransactionRepositoryTrait};
use finsight_core::Result;

use super::model::TransactionRow;
use crate::errors::{IntoCore, StorageError};
use crate::store::MemoryStore;

pub struct TransactionRepository {
    store: Arc<MemoryStore>,
    next_id: AtomicU64,
}

impl TransactionRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            next_id: AtomicU64::new(1),
        }
    }

    fn load_rows(&self, user_id: &str) -> std::result::Result<Vec<TransactionRow>, StorageError> {
        Ok(self
            .store
            .transactions
            .get::<Vec<TransactionRow>>(user_id)?
            .unwrap_or_default())
    }

    /// Every stored transaction of `user_id`, ordered by date.
    pub fn list(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.load_rows(user_id)
            .and_then(|rows| rows.into_iter().map(Transaction::try_from).collect())
            .into_core()
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn fetch_transactions(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let rows = self.load_rows(user_id).into_core()?;
        rows.into_iter()
            .filter(|row| row.date >= start && row.date <= end)
            .map(Transaction::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .into_core()
    }

    fn insert_transaction(&self, user_id: &str, transaction: Transaction) -> Result<()> {
        let id = match &transaction.id {
            Some(id) => id.clone(),
            None => format!("txn-{}", self.next_id.fetch_add(1, Ordering::Relaxed)),
        };
        let mut rows = self.load_rows(user_id).into_core()?;
        let row = TransactionRow::from_domain(id, transaction);
        // Stable insert keeps same-day transactions in arrival order.
        let position = rows.partition_point(|existing| existing.date <= row.date);
        debug!("Storing transaction {} for user {}", row.id, user_id);
        rows.insert(position, row);
        self.store.transactions.put(user_id, &rows).into_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_fetch_is_inclusive_and_date_ordered() {
        let repo = TransactionRepository::new(Arc::new(MemoryStore::new()));
        repo.insert_transaction("u1", Transaction::expense("Dining", dec!(-30), date(20)))
            .unwrap();
        repo.insert_transaction("u1", Transaction::expense("Dining", dec!(-10), date(1)))
            .unwrap();
        repo.insert_transaction("u1", Transaction::expense("Rent", dec!(-900), date(13)))
            .unwrap();

        let window = repo.fetch_transactions("u1", date(1), date(13)).unwrap();
        let amounts: Vec<_> = window.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![dec!(-10), dec!(-900)]);

        assert_eq!(repo.list("u1").unwrap().len(), 3);
        assert!(repo.fetch_transactions("u2", date(1), date(31)).unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_assigned_when_missing() {
        let repo = TransactionRepository::new(Arc::new(MemoryStore::new()));
        let mut named = Transaction::expense("Dining", dec!(-5), date(2));
        named.id = Some("bank-77".to_string());
        repo.insert_transaction("u1", named).unwrap();
        repo.insert_transaction("u1", Transaction::expense("Dining", dec!(-6), date(3)))
            .unwrap();

        let ids: Vec<_> = repo
            .list("u1")
            .unwrap()
            .into_iter()
            .filter_map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["bank-77".to_string(), "txn-1".to_string()]);
    }
}
