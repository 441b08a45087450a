use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use finsight_core::achievements::AchievementService;
use finsight_core::guardrails::GuardrailService;
use finsight_core::notifications::NotificationService;
use finsight_core::scorecard::ScorecardService;
use finsight_core::summaries::SummaryService;
use finsight_core::InsightConfig;
use finsight_storage_memory::{
    AchievementRepository, FinancialRecordsRepository, MemoryStore, NotificationRepository,
    ScorecardRepository, StoredSnapshotSource, TransactionRepository,
};

pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub records: Arc<FinancialRecordsRepository>,
    pub transactions: Arc<TransactionRepository>,
    pub notification_service: Arc<NotificationService>,
    pub achievement_service: Arc<AchievementService>,
    pub guardrail_service: Arc<GuardrailService>,
    pub summary_service: Arc<SummaryService>,
    pub scorecard_service: Arc<ScorecardService>,
    pub config: InsightConfig,
}

pub fn init_tracing() {
    let log_format = std::env::var("FINSIGHT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr; stdout carries the sweep report.
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: InsightConfig) -> AppState {
    let store = Arc::new(MemoryStore::new());

    let notification_service = Arc::new(NotificationService::new(Arc::new(
        NotificationRepository::new(store.clone()),
    )));
    let records = Arc::new(FinancialRecordsRepository::new(store.clone()));
    let transactions = Arc::new(TransactionRepository::new(store.clone()));

    let achievement_service = Arc::new(AchievementService::new(
        Arc::new(AchievementRepository::new(store.clone())),
        notification_service.clone(),
        config.clone(),
    ));
    let guardrail_service = Arc::new(GuardrailService::new(
        transactions.clone(),
        notification_service.clone(),
        config.clone(),
    ));
    let summary_service = Arc::new(SummaryService::new(
        notification_service.clone(),
        config.clone(),
    ));
    let snapshot_source = Arc::new(StoredSnapshotSource::new(
        records.clone(),
        transactions.clone(),
        guardrail_service.clone(),
    ));
    let scorecard_service = Arc::new(ScorecardService::new(
        Arc::new(ScorecardRepository::new(store.clone())),
        snapshot_source,
        notification_service.clone(),
        config.clone(),
    ));

    AppState {
        store,
        records,
        transactions,
        notification_service,
        achievement_service,
        guardrail_service,
        summary_service,
        scorecard_service,
        config,
    }
}
