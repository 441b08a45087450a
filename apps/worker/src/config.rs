use std::path::PathBuf;

use finsight_core::summaries::SummaryPeriod;

/// Worker settings read from `FINSIGHT_*` environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub fixtures_path: PathBuf,
    /// Summary to generate during the sweep, if any
    pub summary: Option<SummaryPeriod>,
    pub run_scorecards: bool,
}

impl WorkerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fixtures_path = lookup("FINSIGHT_FIXTURES")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./fixtures/demo.json"));

        let summary = match lookup("FINSIGHT_SWEEP_SUMMARY")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("weekly") => Some(SummaryPeriod::Weekly),
            Some("monthly") => Some(SummaryPeriod::Monthly),
            Some("") | Some("none") | None => None,
            Some(other) => {
                tracing::warn!("Ignoring unknown FINSIGHT_SWEEP_SUMMARY value '{}'", other);
                None
            }
        };

        let run_scorecards = lookup("FINSIGHT_SWEEP_SCORECARDS")
            .map(|v| !matches!(v.trim(), "0" | "false" | "off"))
            .unwrap_or(true);

        Self {
            fixtures_path,
            summary,
            run_scorecards,
        }
    }
}
