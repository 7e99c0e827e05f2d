//! Summary reports
//!
//! Aggregates a set of records into totals and per-category breakdowns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Money, Record, RecordKind};

/// Totals and per-category breakdowns over a record set
///
/// Field names match the `summary` object of the export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub transaction_count: usize,
    /// Only categories with at least one income record appear
    pub income_by_category: BTreeMap<String, Money>,
    /// Only categories with at least one expense record appear
    pub expense_by_category: BTreeMap<String, Money>,
    pub income_transactions: usize,
    pub expense_transactions: usize,
}

impl Summary {
    /// Build a summary over the given records
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut summary = Self::default();

        for record in records {
            summary.transaction_count += 1;
            match record.kind() {
                RecordKind::Income => {
                    summary.total_income += record.amount();
                    summary.income_transactions += 1;
                    *summary
                        .income_by_category
                        .entry(record.category().to_string())
                        .or_default() += record.amount();
                }
                RecordKind::Expense => {
                    summary.total_expenses += record.amount();
                    summary.expense_transactions += 1;
                    *summary
                        .expense_by_category
                        .entry(record.category().to_string())
                        .or_default() += record.amount();
                }
            }
        }

        summary.balance = summary.total_income - summary.total_expenses;
        summary
    }

    /// Whether income covers expenses
    pub fn is_positive(&self) -> bool {
        !self.balance.is_negative()
    }

    /// The `n` largest expense categories, largest first
    ///
    /// Ties are broken by category name so the order is stable.
    pub fn top_expense_categories(&self, n: usize) -> Vec<(String, Money)> {
        let mut categories: Vec<_> = self
            .expense_by_category
            .iter()
            .map(|(name, amount)| (name.clone(), *amount))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        categories.truncate(n);
        categories
    }
}

/// Totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
    pub transaction_count: usize,
}

impl MonthlySummary {
    /// Build the summary for `year`/`month` from all records
    ///
    /// Records outside the month are ignored. A month with no records (or an
    /// out-of-range month number) yields zeros.
    pub fn for_month<'a, I>(records: I, year: i32, month: u32) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut income = Money::zero();
        let mut expenses = Money::zero();
        let mut transaction_count = 0;

        for record in records
            .into_iter()
            .filter(|r| r.falls_in_month(year, month))
        {
            transaction_count += 1;
            match record.kind() {
                RecordKind::Income => income += record.amount(),
                RecordKind::Expense => expenses += record.amount(),
            }
        }

        Self {
            year,
            month,
            income,
            expenses,
            balance: income - expenses,
            transaction_count,
        }
    }
}
