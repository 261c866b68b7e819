// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::Cell;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use outgo::engine::error::ExpenseError;
use outgo::engine::expand::expand_installments;
use outgo::engine::ids::IdGenerator;
use outgo::engine::input::InstallmentInput;
use outgo::models::PaymentType;

struct SeqIds(Cell<u32>);

impl SeqIds {
    fn new() -> SeqIds {
        SeqIds(Cell::new(0))
    }
}

impl IdGenerator for SeqIds {
    fn generate(&self) -> String {
        let n = self.0.get();
        self.0.set(n + 1);
        format!("id-{}", n)
    }
}

fn input(total: &str, count: u32, start: &str) -> InstallmentInput {
    InstallmentInput {
        name: "Laptop".into(),
        total_amount: total.parse().unwrap(),
        count,
        start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        time: None,
        category_id: "cat-1".into(),
        payment_source_id: "src-1".into(),
    }
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap()
}

#[test]
fn splits_into_count_members_with_labels_and_numbers() {
    let members =
        expand_installments(&input("1000", 4, "2025-01-15"), "owner-1", &SeqIds::new(), fixed_now())
            .unwrap();

    assert_eq!(members.len(), 4);
    for (i, m) in members.iter().enumerate() {
        assert_eq!(m.installment_number, Some(i as u32 + 1));
        assert_eq!(m.total_installments, Some(4));
        assert_eq!(m.name, format!("Laptop ({}/4)", i + 1));
        assert_eq!(m.payment_type, PaymentType::Installment);
        assert!(m.is_installment());
    }
    // all members share one group link
    let group = members[0].related_expense_id.clone().unwrap();
    assert!(members.iter().all(|m| m.related_expense_id.as_deref() == Some(group.as_str())));
}

#[test]
fn dates_advance_one_month_from_start() {
    let members =
        expand_installments(&input("1000", 4, "2025-01-15"), "owner-1", &SeqIds::new(), fixed_now())
            .unwrap();
    let dates: Vec<String> = members.iter().map(|m| m.date.to_string()).collect();
    assert_eq!(dates, ["2025-01-15", "2025-02-15", "2025-03-15", "2025-04-15"]);
}

#[test]
fn day_of_month_clamps_to_shorter_months() {
    let members =
        expand_installments(&input("300", 3, "2025-01-31"), "owner-1", &SeqIds::new(), fixed_now())
            .unwrap();
    let dates: Vec<String> = members.iter().map(|m| m.date.to_string()).collect();
    // February has no 31st; March does again
    assert_eq!(dates, ["2025-01-31", "2025-02-28", "2025-03-31"]);
}

#[test]
fn sum_is_exact_when_division_does_not_round_evenly() {
    let members =
        expand_installments(&input("100", 3, "2025-03-01"), "owner-1", &SeqIds::new(), fixed_now())
            .unwrap();
    let amounts: Vec<String> = members.iter().map(|m| m.amount.to_string()).collect();
    assert_eq!(amounts, ["33.33", "33.33", "33.34"]);

    let sum: Decimal = members.iter().map(|m| m.amount).sum();
    assert_eq!(sum, "100".parse::<Decimal>().unwrap());
}

#[test]
fn sum_is_exact_for_even_division() {
    let members =
        expand_installments(&input("1000", 4, "2025-03-01"), "owner-1", &SeqIds::new(), fixed_now())
            .unwrap();
    assert!(members.iter().all(|m| m.amount == "250".parse().unwrap()));
}

#[test]
fn rejects_fewer_than_two_installments() {
    let err =
        expand_installments(&input("100", 1, "2025-03-01"), "owner-1", &SeqIds::new(), fixed_now())
            .unwrap_err();
    assert_eq!(err, ExpenseError::TooFewInstallments);
}

#[test]
fn rejects_non_positive_total() {
    let err =
        expand_installments(&input("0", 3, "2025-03-01"), "owner-1", &SeqIds::new(), fixed_now())
            .unwrap_err();
    assert_eq!(err, ExpenseError::InvalidAmount);
}

#[test]
fn rejects_missing_owner() {
    let err = expand_installments(&input("100", 3, "2025-03-01"), "", &SeqIds::new(), fixed_now())
        .unwrap_err();
    assert_eq!(err, ExpenseError::MissingOwner);
}
