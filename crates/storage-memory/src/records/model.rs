//! Stored financial record models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finsight_core::guardrails::SpendingLimit;
use finsight_core::scorecard::IncomeSplit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    pub amount: Decimal,
    #[serde(default)]
    pub source: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub name: String,
    pub target: Decimal,
    #[serde(default)]
    pub current: Decimal,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRecord {
    pub name: String,
    pub balance: Decimal,
    /// Annual rate in percent
    #[serde(default)]
    pub interest_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub category: String,
    pub limit: Decimal,
}

/// Everything stored for one user apart from transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialRecords {
    pub income: Vec<IncomeEntry>,
    pub goals: Vec<GoalRecord>,
    pub debts: Vec<DebtRecord>,
    pub investments: Vec<InvestmentRecord>,
    pub budgets: Vec<BudgetRecord>,
    pub spending_limits: Vec<SpendingLimit>,
    pub income_split: Option<IncomeSplit>,
}

impl FinancialRecords {
    pub fn is_empty(&self) -> bool {
        self.income.is_empty()
            && self.goals.is_empty()
            && self.debts.is_empty()
            && self.investments.is_empty()
            && self.budgets.is_empty()
            && self.spending_limits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_partial_document_deserializes() {
        let records: FinancialRecords = serde_json::from_value(json!({
            "income": [{"amount": 4200, "source": "Salary", "date": "2024-05-01"}],
            "investments": [{"name": "Roth IRA", "type": "Retirement", "amount": 12000}],
            "spendingLimits": [{"category": "Dining", "amount": 300, "period": "monthly"}]
        }))
        .unwrap();

        assert_eq!(records.income[0].amount, dec!(4200));
        assert_eq!(records.investments[0].investment_type, "Retirement");
        assert_eq!(records.spending_limits.len(), 1);
        assert!(records.goals.is_empty());
        assert!(records.income_split.is_none());
        assert!(!records.is_empty());
    }
}
