// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::engine::error::ExpenseError;
use crate::engine::ids::IdGenerator;
use crate::engine::input::{InstallmentInput, OneTimeInput, RecurringInput};
use crate::models::{Expense, PaymentType, RecurrenceType};

/// Placeholder stored when an entry carries no wall-clock time.
pub const DEFAULT_TIME: &str = "00:00";

/// A recurring expansion never generates more than this many members,
/// regardless of the requested end date.
pub const RECURRENCE_CAP: usize = 12;

const RECURRENCE_HORIZON_MONTHS: u32 = 12;

/// Builds a single one-time ledger entry from validated user input.
pub fn build_expense(
    input: &OneTimeInput,
    owner_id: &str,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Result<Expense, ExpenseError> {
    validate_fields(
        input.amount,
        &input.name,
        &input.category_id,
        &input.payment_source_id,
        owner_id,
    )?;
    Ok(Expense {
        id: ids.generate(),
        name: input.name.trim().to_string(),
        amount: input.amount,
        date: input.date,
        time: Some(normalize_time(input.time.as_deref())),
        category_id: input.category_id.clone(),
        payment_source_id: input.payment_source_id.clone(),
        payment_type: PaymentType::OneTime,
        owner_id: owner_id.to_string(),
        installment_number: None,
        total_installments: None,
        related_expense_id: None,
        recurrence_id: None,
        recurrence_type: None,
        recurring_end_date: None,
        created_at: now,
        updated_at: now,
    })
}

/// Splits a total into `count` monthly entries. Every member gets the half-up
/// rounded share; the final member absorbs the rounding remainder so the
/// group sums exactly to the total.
pub fn expand_installments(
    input: &InstallmentInput,
    owner_id: &str,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Result<Vec<Expense>, ExpenseError> {
    validate_fields(
        input.total_amount,
        &input.name,
        &input.category_id,
        &input.payment_source_id,
        owner_id,
    )?;
    if input.count < 2 {
        return Err(ExpenseError::TooFewInstallments);
    }

    let count = input.count;
    let share = round2(input.total_amount / Decimal::from(count));
    let last = input.total_amount - share * Decimal::from(count - 1);
    let group_id = ids.generate();
    let name = input.name.trim();
    let time = normalize_time(input.time.as_deref());

    let mut members = Vec::with_capacity(count as usize);
    for i in 0..count {
        members.push(Expense {
            id: ids.generate(),
            name: format!("{} ({}/{})", name, i + 1, count),
            amount: if i + 1 == count { last } else { share },
            date: add_months(input.start_date, i),
            time: Some(time.clone()),
            category_id: input.category_id.clone(),
            payment_source_id: input.payment_source_id.clone(),
            payment_type: PaymentType::Installment,
            owner_id: owner_id.to_string(),
            installment_number: Some(i + 1),
            total_installments: Some(count),
            related_expense_id: Some(group_id.clone()),
            recurrence_id: None,
            recurrence_type: None,
            recurring_end_date: None,
            created_at: now,
            updated_at: now,
        });
    }
    Ok(members)
}

/// Builds the originating entry of a monthly series. The repeated members are
/// produced separately by [`expand_recurring`].
pub fn build_recurring_origin(
    input: &RecurringInput,
    owner_id: &str,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Result<Expense, ExpenseError> {
    validate_fields(
        input.amount,
        &input.name,
        &input.category_id,
        &input.payment_source_id,
        owner_id,
    )?;
    Ok(Expense {
        id: ids.generate(),
        name: input.name.trim().to_string(),
        amount: input.amount,
        date: input.start_date,
        time: Some(normalize_time(input.time.as_deref())),
        category_id: input.category_id.clone(),
        payment_source_id: input.payment_source_id.clone(),
        payment_type: PaymentType::Recurring,
        owner_id: owner_id.to_string(),
        installment_number: None,
        total_installments: None,
        related_expense_id: None,
        recurrence_id: None,
        recurrence_type: Some(RecurrenceType::Monthly),
        recurring_end_date: input.end_date,
        created_at: now,
        updated_at: now,
    })
}

/// Generates the repeated members of a monthly series, one per month starting
/// the month after the origin. Bounded by the origin's end date when present,
/// otherwise by a twelve-month horizon, and always by [`RECURRENCE_CAP`].
///
/// The origin counts as occurrence 1; the first generated member is suffixed
/// "(2)".
pub fn expand_recurring(
    origin: &Expense,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Vec<Expense> {
    let horizon = origin
        .recurring_end_date
        .unwrap_or_else(|| add_months(origin.date, RECURRENCE_HORIZON_MONTHS));
    let recurrence_id = ids.generate();

    let mut members = Vec::new();
    for i in 1..=RECURRENCE_CAP as u32 {
        let date = add_months(origin.date, i);
        if date > horizon {
            break;
        }
        members.push(Expense {
            id: ids.generate(),
            name: format!("{} ({})", origin.name, i + 1),
            amount: origin.amount,
            date,
            time: origin.time.clone(),
            category_id: origin.category_id.clone(),
            payment_source_id: origin.payment_source_id.clone(),
            payment_type: PaymentType::Recurring,
            owner_id: origin.owner_id.clone(),
            installment_number: None,
            total_installments: None,
            related_expense_id: Some(origin.id.clone()),
            recurrence_id: Some(recurrence_id.clone()),
            recurrence_type: Some(RecurrenceType::Monthly),
            recurring_end_date: origin.recurring_end_date,
            created_at: now,
            updated_at: now,
        });
    }
    members
}

/// Re-checks the field invariants on an existing entry, used by the update
/// path where the id and timestamps are preserved.
pub fn validate(expense: &Expense) -> Result<(), ExpenseError> {
    validate_fields(
        expense.amount,
        &expense.name,
        &expense.category_id,
        &expense.payment_source_id,
        &expense.owner_id,
    )
}

/// Advances a date by whole calendar months, clamping the day to the target
/// month's length (Jan 31 + 1 month is Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months as i32;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

fn round2(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn normalize_time(time: Option<&str>) -> String {
    match time {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => DEFAULT_TIME.to_string(),
    }
}

fn validate_fields(
    amount: Decimal,
    name: &str,
    category_id: &str,
    payment_source_id: &str,
    owner_id: &str,
) -> Result<(), ExpenseError> {
    if owner_id.trim().is_empty() {
        return Err(ExpenseError::MissingOwner);
    }
    if amount <= Decimal::ZERO {
        return Err(ExpenseError::InvalidAmount);
    }
    if name.trim().is_empty() {
        return Err(ExpenseError::MissingName);
    }
    if category_id.trim().is_empty() {
        return Err(ExpenseError::MissingCategory);
    }
    if payment_source_id.trim().is_empty() {
        return Err(ExpenseError::MissingPaymentSource);
    }
    Ok(())
}
