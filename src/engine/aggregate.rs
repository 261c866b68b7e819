// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::engine::fiscal::FinancialMonth;
use crate::models::Expense;

/// Which foreign reference a filter matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Category,
    Source,
}

/// Keeps the entries whose date buckets into the given financial month.
pub fn filter_by_financial_month(
    expenses: &[Expense],
    month: FinancialMonth,
    start_day: u32,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| FinancialMonth::of(e.date, start_day) == month)
        .cloned()
        .collect()
}

/// Restricts entries to those referencing the given category or source id.
pub fn filter_by_reference(expenses: &[Expense], id: &str, kind: FilterKind) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| match kind {
            FilterKind::Category => e.category_id == id,
            FilterKind::Source => e.payment_source_id == id,
        })
        .cloned()
        .collect()
}

/// Sums amounts per category id. Categories with no entries are absent from
/// the result, not zero-filled.
pub fn group_by_category(expenses: &[Expense]) -> HashMap<String, Decimal> {
    let mut totals = HashMap::new();
    for e in expenses {
        *totals.entry(e.category_id.clone()).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

/// Sums amounts per payment-source id.
pub fn group_by_source(expenses: &[Expense]) -> HashMap<String, Decimal> {
    let mut totals = HashMap::new();
    for e in expenses {
        *totals
            .entry(e.payment_source_id.clone())
            .or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

/// Total over the collection; zero when empty.
pub fn total_amount(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Newest first. The sort is stable, so entries sharing a date keep their
/// relative input order.
pub fn sort_by_date_desc(expenses: &[Expense]) -> Vec<Expense> {
    let mut out = expenses.to_vec();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
