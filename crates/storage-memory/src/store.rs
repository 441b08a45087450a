//! Keyed document store shared by every repository.

use dashmap::{DashMap, DashSet};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StorageError;

/// One named table of JSON documents keyed by user id.
pub struct Table {
    name: &'static str,
    rows: DashMap<String, serde_json::Value>,
}

impl Table {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        // Clone out of the shard before deserializing to keep the read lock short.
        let value = match self.rows.get(key) {
            Some(row) => row.value().clone(),
            None => return Ok(None),
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    pub fn put<T: Serialize>(&self, key: &str, document: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(document)?;
        self.rows.insert(key.to_string(), value);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> bool {
        self.rows.remove(key).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.rows.iter().map(|row| row.key().clone()).collect();
        keys.sort();
        keys
    }
}

/// Process-local store holding every table.
///
/// Repositories share one store through `Arc<MemoryStore>`. Per-user
/// read-modify-write atomicity is the services' job; the store only
/// guarantees that single reads and writes are atomic.
pub struct MemoryStore {
    pub(crate) notifications: Table,
    pub(crate) unread_users: DashSet<String>,
    pub(crate) achievements: Table,
    pub(crate) transactions: Table,
    pub(crate) scorecards: Table,
    pub(crate) records: Table,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            notifications: Table::new("notifications"),
            unread_users: DashSet::new(),
            achievements: Table::new("achievements"),
            transactions: Table::new("transactions"),
            scorecards: Table::new("scorecards"),
            records: Table::new("financial_records"),
        }
    }

    /// Users with any stored financial records or transactions, sorted.
    pub fn known_users(&self) -> Vec<String> {
        let mut users = self.records.keys();
        for user in self.transactions.keys() {
            if !users.contains(&user) {
                users.push(user);
            }
        }
        users.sort();
        users
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        value: u32,
    }

    #[test]
    fn test_put_get_remove() {
        let table = Table::new("docs");
        assert_eq!(table.get::<Doc>("u1").unwrap(), None);

        table.put("u1", &Doc { value: 7 }).unwrap();
        assert_eq!(table.get::<Doc>("u1").unwrap(), Some(Doc { value: 7 }));

        assert!(table.remove("u1"));
        assert!(!table.remove("u1"));
    }

    #[test]
    fn test_shape_mismatch_is_serialization_error() {
        let table = Table::new("docs");
        table.put("u1", &"just a string").unwrap();
        assert!(matches!(
            table.get::<Doc>("u1"),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_known_users_merges_tables() {
        let store = MemoryStore::new();
        store.records.put("bob", &Doc { value: 1 }).unwrap();
        store.transactions.put("alice", &Doc { value: 2 }).unwrap();
        store.transactions.put("bob", &Doc { value: 3 }).unwrap();
        assert_eq!(store.known_users(), vec!["alice", "bob"]);
    }
}
