// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single dated expense as entered by the user.
#[derive(Debug, Clone)]
pub struct OneTimeInput {
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub category_id: String,
    pub payment_source_id: String,
}

/// A total amount to split into monthly installments starting at `start_date`.
#[derive(Debug, Clone)]
pub struct InstallmentInput {
    pub name: String,
    pub total_amount: Decimal,
    pub count: u32,
    pub start_date: NaiveDate,
    pub time: Option<String>,
    pub category_id: String,
    pub payment_source_id: String,
}

/// A monthly-repeating expense, open-ended or bounded by `end_date`.
#[derive(Debug, Clone)]
pub struct RecurringInput {
    pub name: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time: Option<String>,
    pub category_id: String,
    pub payment_source_id: String,
}
