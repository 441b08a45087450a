//! Achievement state repository implementation.

use std::sync::Arc;

use finsight_core::achievements::{AchievementRepositoryTrait, UserAchievementState};
use finsight_core::Result;

use crate::errors::IntoCore;
use crate::store::MemoryStore;

pub struct AchievementRepository {
    store: Arc<MemoryStore>,
}

impl AchievementRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl AchievementRepositoryTrait for AchievementRepository {
    fn load_state(&self, user_id: &str) -> Result<Option<UserAchievementState>> {
        self.store.achievements.get(user_id).into_core()
    }

    fn save_state(&self, state: UserAchievementState) -> Result<()> {
        self.store
            .achievements
            .put(&state.user_id, &state)
            .into_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::achievements::ACHIEVEMENT_CATALOGUE;

    #[test]
    fn test_state_survives_the_store() {
        let repo = AchievementRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.load_state("u1").unwrap().is_none());

        let mut state = UserAchievementState::seeded("u1", ACHIEVEMENT_CATALOGUE);
        state.stats.total_saved = 250.0;
        state.stats.login_streak = 3;
        repo.save_state(state.clone()).unwrap();

        assert_eq!(repo.load_state("u1").unwrap(), Some(state));
    }
}
