//! Per-user write serialization.
//!
//! Read-modify-write sequences against a keyed repository must not interleave
//! for the same user. Different users never contend.

use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lazily created mutex per user id.
#[derive(Default)]
pub struct UserLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock handle for `user_id`, creating it on first use.
    pub fn handle(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Acquires `handle`, recovering from poisoning since the guarded value is `()`.
pub fn acquire(handle: &Mutex<()>) -> MutexGuard<'_, ()> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
