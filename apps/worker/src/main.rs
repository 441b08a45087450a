mod config;
mod fixtures;
mod main_lib;
mod sweep;

use config::WorkerConfig;
use finsight_core::InsightConfig;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let insight_config = InsightConfig::from_env()?;
    let worker_config = WorkerConfig::from_env();
    tracing::info!(
        "Timezone {}, fixtures {}",
        insight_config.timezone,
        worker_config.fixtures_path.display()
    );

    let state = build_state(insight_config);
    let fixtures = fixtures::read(&worker_config.fixtures_path)?;
    let loaded = fixtures::load(&state, fixtures)?;
    tracing::info!("Loaded {} users", loaded);

    let reports = sweep::run(&state, &worker_config, chrono::Utc::now()).await;
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
