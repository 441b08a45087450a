//! Scorecard service implementation.
//!
//! Orchestrates snapshot fetch, scoring, history persistence and the
//! announcement notification. Generation for one user is serialized through
//! an async per-user lock held across the snapshot fetch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::{debug, info, warn};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

use super::advice::degraded_scorecard;
use super::errors::ScorecardError;
use super::model::{ScoreCard, ScorecardStatus};
use super::scorers::default_scorers;
use super::scoring::compute_scorecard;
use super::traits::{
    CategoryScorer, FinancialSnapshotSource, ScorecardRepositoryTrait, ScorecardServiceTrait,
};
use crate::config::InsightConfig;
use crate::errors::Result;
use crate::notifications::{NewNotification, NotificationSink};
use crate::utils::time_utils::is_older_than;
use crate::utils::user_locks::{acquire, UserLocks};

pub struct ScorecardService {
    repository: Arc<dyn ScorecardRepositoryTrait>,
    source: Arc<dyn FinancialSnapshotSource>,
    sink: Arc<dyn NotificationSink>,
    config: InsightConfig,
    scorers: Vec<Box<dyn CategoryScorer>>,
    /// Guards history read-modify-write
    history_locks: UserLocks,
    /// Serializes whole generations, across the snapshot fetch
    generation_locks: DashMap<String, Arc<AsyncMutex<()>>>,
    statuses: DashMap<String, ScorecardStatus>,
}

impl ScorecardService {
    pub fn new(
        repository: Arc<dyn ScorecardRepositoryTrait>,
        source: Arc<dyn FinancialSnapshotSource>,
        sink: Arc<dyn NotificationSink>,
        config: InsightConfig,
    ) -> Self {
        Self {
            repository,
            source,
            sink,
            config,
            scorers: default_scorers(),
            history_locks: UserLocks::new(),
            generation_locks: DashMap::new(),
            statuses: DashMap::new(),
        }
    }

    fn generation_lock(&self, user_id: &str) -> Arc<AsyncMutex<()>> {
        self.generation_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn set_status(&self, user_id: &str, status: ScorecardStatus) {
        self.statuses.insert(user_id.to_string(), status);
    }

    async fn compute(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<ScoreCard, ScorecardError> {
        let snapshot = self.source.fetch_snapshot(user_id).await?;
        compute_scorecard(
            user_id,
            &snapshot,
            &self.scorers,
            self.config.default_savings_target,
            now,
        )
    }

    /// Caller must hold the user's generation lock.
    async fn generate_locked(&self, user_id: &str, now: DateTime<Utc>) -> Result<ScoreCard> {
        self.set_status(user_id, ScorecardStatus::Computing);
        match self.compute(user_id, now).await {
            Ok(scorecard) => {
                if let Err(e) = self.save(user_id, scorecard.clone()) {
                    self.set_status(user_id, ScorecardStatus::Error);
                    return Err(e);
                }
                self.set_status(user_id, ScorecardStatus::Ready);
                info!(
                    "Generated scorecard for user {}: {} ({})",
                    user_id, scorecard.overall_score, scorecard.score_level
                );
                self.announce(&scorecard);
                Ok(scorecard)
            }
            Err(e) => {
                warn!("Scorecard generation failed for user {}: {}", user_id, e);
                self.set_status(user_id, ScorecardStatus::Error);
                Ok(degraded_scorecard(user_id, now, &e.to_string()))
            }
        }
    }

    fn announce(&self, scorecard: &ScoreCard) {
        let top = scorecard.top_recommendation();
        let notification = NewNotification::system(
            format!("Your Financial Wellness Score: {}", scorecard.overall_score),
            format!("{}: {}", scorecard.score_level, scorecard.score_description),
            json!({
                "overallScore": scorecard.overall_score,
                "scoreLevel": scorecard.score_level,
                "scoreColor": scorecard.score_color,
                "topRecommendation": top.map(|r| r.text.clone()),
            }),
        );
        self.sink.notify(&scorecard.user_id, notification);
    }
}

#[async_trait]
impl ScorecardServiceTrait for ScorecardService {
    async fn generate(&self, user_id: &str) -> Result<ScoreCard> {
        self.generate_at(user_id, Utc::now()).await
    }

    async fn generate_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<ScoreCard> {
        let lock = self.generation_lock(user_id);
        let _generation = lock.lock().await;
        self.generate_locked(user_id, now).await
    }

    async fn generate_if_stale(&self, user_id: &str) -> Result<ScoreCard> {
        self.generate_if_stale_at(user_id, Utc::now()).await
    }

    async fn generate_if_stale_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<ScoreCard> {
        let lock = self.generation_lock(user_id);
        let _generation = lock.lock().await;

        // Checked under the lock so concurrent stale pulls generate once
        match self.get_latest(user_id)? {
            Some(latest)
                if !is_older_than(latest.generated_at, now, self.config.scorecard_max_age_days) =>
            {
                debug!("Scorecard for user {} is fresh; skipping", user_id);
                Ok(latest)
            }
            _ => self.generate_locked(user_id, now).await,
        }
    }

    fn save(&self, user_id: &str, scorecard: ScoreCard) -> Result<()> {
        if scorecard.degraded {
            debug!("Not persisting degraded scorecard for user {}", user_id);
            return Ok(());
        }
        let handle = self.history_locks.handle(user_id);
        let _guard = acquire(&handle);

        let mut history = self.repository.load_history(user_id)?;
        history.insert(0, scorecard);
        history.truncate(self.config.scorecard_history_limit);
        self.repository.save_history(user_id, history)
    }

    fn get_latest(&self, user_id: &str) -> Result<Option<ScoreCard>> {
        Ok(self.repository.load_history(user_id)?.into_iter().next())
    }

    fn get_history(&self, user_id: &str) -> Result<Vec<ScoreCard>> {
        self.repository.load_history(user_id)
    }

    fn should_regenerate(&self, user_id: &str) -> Result<bool> {
        self.should_regenerate_at(user_id, Utc::now())
    }

    fn should_regenerate_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<bool> {
        Ok(match self.get_latest(user_id)? {
            Some(latest) => {
                is_older_than(latest.generated_at, now, self.config.scorecard_max_age_days)
            }
            None => true,
        })
    }

    fn status(&self, user_id: &str) -> ScorecardStatus {
        self.statuses
            .get(user_id)
            .map(|s| *s.value())
            .unwrap_or_default()
    }
}
