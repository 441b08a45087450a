//! Property-based integration tests for notification read state.
//!
//! Runs random operation sequences against the service and checks that the
//! unread index always agrees with the per-notification `read` flags.

use finsight_core::errors::Result;
use finsight_core::notifications::{
    NewNotification, Notification, NotificationRepositoryTrait, NotificationService,
    NotificationServiceTrait,
};
use proptest::prelude::*;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

// =============================================================================
// In-memory repository
// =============================================================================

#[derive(Default)]
struct InMemoryRepository {
    notifications: RwLock<HashMap<String, Vec<Notification>>>,
    unread: RwLock<HashSet<String>>,
}

impl NotificationRepositoryTrait for InMemoryRepository {
    fn load_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        Ok(self
            .notifications
            .read()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_notifications(&self, user_id: &str, notifications: Vec<Notification>) -> Result<()> {
        self.notifications
            .write()
            .unwrap()
            .insert(user_id.to_string(), notifications);
        Ok(())
    }

    fn is_marked_unread(&self, user_id: &str) -> Result<bool> {
        Ok(self.unread.read().unwrap().contains(user_id))
    }

    fn set_marked_unread(&self, user_id: &str, unread: bool) -> Result<()> {
        let mut set = self.unread.write().unwrap();
        if unread {
            set.insert(user_id.to_string());
        } else {
            set.remove(user_id);
        }
        Ok(())
    }
}

// =============================================================================
// Generators
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Create,
    MarkRead(usize),
    MarkAllRead,
    Dismiss(usize),
    ClearAll,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Create),
        4 => (0usize..20).prop_map(Op::MarkRead),
        1 => Just(Op::MarkAllRead),
        2 => (0usize..20).prop_map(Op::Dismiss),
        1 => Just(Op::ClearAll),
    ]
}

fn nth_id(service: &NotificationService, user_id: &str, index: usize) -> Option<String> {
    let all = service.list_all(user_id).ok()?;
    if all.is_empty() {
        return None;
    }
    Some(all[index % all.len()].id.clone())
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// `has_unread(u)` is true exactly when some notification of `u` is unread.
    #[test]
    fn prop_unread_index_matches_read_flags(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let service = NotificationService::new(Arc::new(InMemoryRepository::default()));
        let user = "u1";

        for op in ops {
            match op {
                Op::Create => {
                    let created = service
                        .create(user, NewNotification::system("Title", "Body", json!({})))
                        .unwrap();
                    prop_assert!(!created.read);
                    prop_assert!(service.has_unread(user).unwrap());
                }
                Op::MarkRead(i) => {
                    if let Some(id) = nth_id(&service, user, i) {
                        prop_assert!(service.mark_read(user, &id).unwrap());
                    }
                }
                Op::MarkAllRead => {
                    service.mark_all_read(user).unwrap();
                }
                Op::Dismiss(i) => {
                    if let Some(id) = nth_id(&service, user, i) {
                        prop_assert!(service.dismiss(user, &id).unwrap());
                    }
                }
                Op::ClearAll => {
                    service.clear_all(user).unwrap();
                    prop_assert!(service.list_all(user).unwrap().is_empty());
                }
            }

            let any_unread = service.list_all(user).unwrap().iter().any(|n| !n.read);
            prop_assert_eq!(service.has_unread(user).unwrap(), any_unread);
            prop_assert_eq!(
                service.count_unread(user).unwrap(),
                service.list_unread(user).unwrap().len()
            );
        }
    }
}
