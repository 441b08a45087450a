//! JSON fixtures seeding the memory store.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use finsight_core::guardrails::{Transaction, TransactionRepositoryTrait};
use finsight_storage_memory::FinancialRecords;

use crate::main_lib::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFixture {
    pub user_id: String,
    #[serde(default)]
    pub records: FinancialRecords,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureFile {
    #[serde(default)]
    pub users: Vec<UserFixture>,
}

pub fn read(path: &Path) -> anyhow::Result<FixtureFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixtures from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing fixtures in {}", path.display()))
}

/// Stores every fixture and returns the number of users loaded.
pub fn load(state: &AppState, fixtures: FixtureFile) -> anyhow::Result<usize> {
    let count = fixtures.users.len();
    for user in fixtures.users {
        if user.user_id.trim().is_empty() {
            anyhow::bail!("fixture without a userId");
        }
        state.records.save(&user.user_id, user.records)?;
        for transaction in user.transactions {
            state
                .transactions
                .insert_transaction(&user.user_id, transaction)?;
        }
        tracing::debug!("Loaded fixture for {}", user.user_id);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::main_lib::build_state;
    use finsight_core::InsightConfig;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "users": [{
            "userId": "alice",
            "records": {
                "income": [{"amount": 4000, "source": "Salary", "date": "2024-06-01"}],
                "spendingLimits": [{"category": "Dining", "amount": 200, "period": "monthly"}]
            },
            "transactions": [
                {"category": "Dining", "amount": -120.5, "date": "2024-06-03"}
            ]
        }]
    }"#;

    #[test]
    fn test_read_and_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let fixtures = read(file.path()).unwrap();
        let state = build_state(InsightConfig::default());
        assert_eq!(load(&state, fixtures).unwrap(), 1);

        let records = state.records.load("alice").unwrap().unwrap();
        assert_eq!(records.spending_limits.len(), 1);
        assert_eq!(state.transactions.list("alice").unwrap().len(), 1);
        assert_eq!(state.store.known_users(), vec!["alice"]);
    }

    #[test]
    fn test_blank_user_is_rejected() {
        let state = build_state(InsightConfig::default());
        let fixtures: FixtureFile =
            serde_json::from_str(r#"{"users": [{"userId": " "}]}"#).unwrap();
        assert!(load(&state, fixtures).is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read(Path::new("/nonexistent/finsight.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/finsight.json"));
    }
}
