//! Financial records repository implementation.

use std::sync::Arc;

use chrono::NaiveDate;

use finsight_core::guardrails::Transaction;
use finsight_core::summaries::{ExpenseRecord, IncomeRecord, PeriodData, SummaryGoal};
use finsight_core::Result;

use super::model::FinancialRecords;
use crate::errors::IntoCore;
use crate::store::MemoryStore;
use crate::transactions::TransactionRepository;

pub struct FinancialRecordsRepository {
    store: Arc<MemoryStore>,
}

impl FinancialRecordsRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn load(&self, user_id: &str) -> Result<Option<FinancialRecords>> {
        self.store.records.get(user_id).into_core()
    }

    /// Replaces the user's records. Income is kept in date order.
    pub fn save(&self, user_id: &str, mut records: FinancialRecords) -> Result<()> {
        records.income.sort_by_key(|entry| entry.date);
        self.store.records.put(user_id, &records).into_core()
    }

    /// Records and transactions dated within `[start, end]`, shaped for the
    /// summary generator. Expenses are the outflows among the transactions.
    pub fn period_data(
        &self,
        user_id: &str,
        transactions: &TransactionRepository,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PeriodData> {
        let records = self.load(user_id)?.unwrap_or_default();
        let in_window = |date: NaiveDate| date >= start && date <= end;

        let income = records
            .income
            .iter()
            .filter(|entry| in_window(entry.date))
            .map(|entry| IncomeRecord {
                amount: entry.amount,
                source: entry.source.clone(),
                date: Some(entry.date),
            })
            .collect();

        let expenses = transactions
            .list(user_id)?
            .into_iter()
            .filter(|t| in_window(t.date) && t.amount.is_sign_negative())
            .map(|t: Transaction| ExpenseRecord {
                amount: t.amount,
                category: t.category,
                date: Some(t.date),
            })
            .collect();

        let goals = records
            .goals
            .iter()
            .map(|goal| SummaryGoal {
                name: goal.name.clone(),
                target: goal.target,
                current: goal.current,
            })
            .collect();

        Ok(PeriodData {
            income,
            expenses,
            goals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GoalRecord, IncomeEntry};
    use finsight_core::guardrails::TransactionRepositoryTrait;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_period_data_filters_by_window() {
        let store = Arc::new(MemoryStore::new());
        let records = FinancialRecordsRepository::new(store.clone());
        let transactions = TransactionRepository::new(store);

        records
            .save(
                "u1",
                FinancialRecords {
                    income: vec![
                        IncomeEntry {
                            amount: dec!(900),
                            source: Some("Freelance".to_string()),
                            date: date(10),
                        },
                        IncomeEntry {
                            amount: dec!(4000),
                            source: Some("Salary".to_string()),
                            date: date(1),
                        },
                    ],
                    goals: vec![GoalRecord {
                        name: "Trip".to_string(),
                        target: dec!(2000),
                        current: dec!(500),
                        completed: false,
                    }],
                    ..Default::default()
                },
            )
            .unwrap();
        transactions
            .insert_transaction("u1", Transaction::expense("Dining", dec!(-40), date(9)))
            .unwrap();
        transactions
            .insert_transaction("u1", Transaction::expense("Refund", dec!(25), date(9)))
            .unwrap();
        transactions
            .insert_transaction("u1", Transaction::expense("Rent", dec!(-900), date(2)))
            .unwrap();

        let data = records
            .period_data("u1", &transactions, date(7), date(14))
            .unwrap();
        assert_eq!(data.income.len(), 1);
        assert_eq!(data.income[0].amount, dec!(900));
        assert_eq!(data.expenses.len(), 1);
        assert_eq!(data.expenses[0].category.as_deref(), Some("Dining"));
        assert_eq!(data.goals.len(), 1);

        // Saved income is sorted by date.
        let stored = records.load("u1").unwrap().unwrap();
        assert_eq!(stored.income[0].date, date(1));
    }
}
