//! Stored transaction rows.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finsight_core::guardrails::Transaction;

use crate::errors::StorageError;

/// Transaction as kept in the store. Amounts are stored as text so that no
/// precision is lost across the JSON boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: String,
    pub category: Option<String>,
    pub amount: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl TransactionRow {
    pub fn from_domain(id: String, transaction: Transaction) -> Self {
        Self {
            id,
            category: transaction.category,
            amount: transaction.amount.to_string(),
            date: transaction.date,
            description: transaction.description,
        }
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StorageError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&row.amount).map_err(|e| StorageError::Corrupt {
            table: "transactions",
            message: format!("amount '{}' of {}: {}", row.amount, row.id, e),
        })?;
        Ok(Transaction {
            id: Some(row.id),
            category: row.category,
            amount,
            date: row.date,
            description: row.description,
        })
    }
}
