//! Scorecard history repository implementation.

use std::sync::Arc;

use finsight_core::scorecard::{ScoreCard, ScorecardRepositoryTrait};
use finsight_core::Result;

use crate::errors::IntoCore;
use crate::store::MemoryStore;

pub struct ScorecardRepository {
    store: Arc<MemoryStore>,
}

impl ScorecardRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl ScorecardRepositoryTrait for ScorecardRepository {
    fn load_history(&self, user_id: &str) -> Result<Vec<ScoreCard>> {
        Ok(self
            .store
            .scorecards
            .get::<Vec<ScoreCard>>(user_id)
            .into_core()?
            .unwrap_or_default())
    }

    fn save_history(&self, user_id: &str, history: Vec<ScoreCard>) -> Result<()> {
        self.store.scorecards.put(user_id, &history).into_core()
    }
}
