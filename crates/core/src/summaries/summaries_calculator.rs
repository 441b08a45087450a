//! Pure aggregation over a period's income and expense records.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::summaries_model::{
    ExpenseRecord, GoalStatus, IncomeRecord, NamedAmount, PeriodChange, PreviousPeriod,
    SummaryGoal, SummaryPeriod,
};
use crate::constants::DEFAULT_EXPENSE_CATEGORY;
use crate::utils::format::{money, round_percent};

/// Totals shared by weekly and monthly summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_cashflow: Decimal,
    pub savings_rate: Decimal,
    pub income_breakdown: Vec<NamedAmount>,
    pub expenses_by_category: Vec<NamedAmount>,
}

fn label(name: Option<&str>, fallback: &str) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => fallback.to_string(),
    }
}

/// Sums amounts per name, largest first. Ties keep first-seen order.
fn group<I>(items: I) -> Vec<NamedAmount>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for (name, amount) in items {
        if !totals.contains_key(&name) {
            order.push(name.clone());
        }
        *totals.entry(name).or_insert(Decimal::ZERO) += amount;
    }
    let mut grouped: Vec<NamedAmount> = order
        .into_iter()
        .map(|name| {
            let amount = totals.get(&name).copied().unwrap_or_default();
            NamedAmount { name, amount }
        })
        .collect();
    grouped.sort_by(|a, b| b.amount.cmp(&a.amount));
    grouped
}

/// `(income - expenses) / income * 100`, one decimal; zero without income.
pub fn savings_rate(total_income: Decimal, total_expenses: Decimal) -> Decimal {
    if total_income.is_zero() {
        return Decimal::ZERO;
    }
    round_percent((total_income - total_expenses) * Decimal::ONE_HUNDRED / total_income)
}

/// Percentage change from `old` to `new`, one decimal.
///
/// A zero baseline reports 100 when the value grew and 0 otherwise.
pub fn percent_change(new: Decimal, old: Decimal) -> Decimal {
    if old.is_zero() {
        return if new > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    round_percent((new - old) * Decimal::ONE_HUNDRED / old)
}

pub fn totals(income: &[IncomeRecord], expenses: &[ExpenseRecord]) -> PeriodTotals {
    let total_income: Decimal = income.iter().map(|r| r.amount).sum();
    let total_expenses: Decimal = expenses.iter().map(|r| r.amount.abs()).sum();

    let income_breakdown = group(
        income
            .iter()
            .map(|r| (label(r.source.as_deref(), "Other"), r.amount)),
    );
    let expenses_by_category = group(expenses.iter().map(|r| {
        (
            label(r.category.as_deref(), DEFAULT_EXPENSE_CATEGORY),
            r.amount.abs(),
        )
    }));

    PeriodTotals {
        total_income,
        total_expenses,
        net_cashflow: total_income - total_expenses,
        savings_rate: savings_rate(total_income, total_expenses),
        income_breakdown,
        expenses_by_category,
    }
}

pub fn top_categories(expenses_by_category: &[NamedAmount], count: usize) -> Vec<NamedAmount> {
    expenses_by_category.iter().take(count).cloned().collect()
}

pub fn changes(current: &PeriodTotals, previous: &PreviousPeriod) -> PeriodChange {
    PeriodChange {
        income_change: percent_change(current.total_income, previous.total_income),
        expense_change: percent_change(current.total_expenses, previous.total_expenses),
        savings_rate_change: percent_change(current.savings_rate, previous.savings_rate),
    }
}

pub fn goal_statuses(goals: &[SummaryGoal]) -> Vec<GoalStatus> {
    goals
        .iter()
        .map(|goal| {
            let percentage = if goal.target > Decimal::ZERO {
                round_percent(goal.current * Decimal::ONE_HUNDRED / goal.target)
            } else {
                Decimal::ZERO
            };
            GoalStatus {
                name: goal.name.clone(),
                target: goal.target,
                current: goal.current,
                percentage,
            }
        })
        .collect()
}

pub fn compose_message(
    period: SummaryPeriod,
    totals: &PeriodTotals,
    top: &[NamedAmount],
) -> String {
    let noun = period.noun();
    let mut message = if totals.net_cashflow > Decimal::ZERO {
        format!(
            "Net savings of {} this {} ({}% savings rate).",
            money(totals.net_cashflow),
            noun,
            totals.savings_rate
        )
    } else if totals.net_cashflow < Decimal::ZERO {
        format!(
            "Net deficit of {} this {}. Expenses exceeded income.",
            money(totals.net_cashflow.abs()),
            noun
        )
    } else {
        format!("Break-even this {}: income matched expenses.", noun)
    };

    if !top.is_empty() {
        let names: Vec<String> = top
            .iter()
            .map(|c| format!("{} ({})", c.name, money(c.amount)))
            .collect();
        let lead = if top.len() == 1 {
            "Top spending category"
        } else {
            "Top spending categories"
        };
        message.push_str(&format!(" {}: {}.", lead, names.join(", ")));
    }
    message
}
