// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use outgo::engine::fiscal::{DEFAULT_MONTH_START_DAY, FinancialMonth};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn day_before_start_day_belongs_to_previous_month() {
    let fm = FinancialMonth::of(date("2025-05-10"), 11);
    assert_eq!(fm, FinancialMonth { year: 2025, month: 4 });
}

#[test]
fn start_day_itself_belongs_to_its_calendar_month() {
    let fm = FinancialMonth::of(date("2025-05-11"), 11);
    assert_eq!(fm, FinancialMonth { year: 2025, month: 5 });
}

#[test]
fn early_january_wraps_to_december_of_previous_year() {
    let fm = FinancialMonth::of(date("2025-01-05"), 11);
    assert_eq!(fm, FinancialMonth { year: 2024, month: 12 });
}

#[test]
fn start_day_one_matches_calendar_months() {
    for s in ["2025-01-01", "2025-06-15", "2025-12-31"] {
        let d = date(s);
        let fm = FinancialMonth::of(d, 1);
        assert_eq!(fm.year, 2025);
        assert_eq!(fm.month, d.format("%m").to_string().parse::<u32>().unwrap());
    }
}

#[test]
fn current_uses_the_same_rule_as_of() {
    let today = date("2025-05-10");
    assert_eq!(
        FinancialMonth::current(today, 11),
        FinancialMonth::of(today, 11)
    );
}

#[test]
fn default_start_day_is_eleven() {
    assert_eq!(DEFAULT_MONTH_START_DAY, 11);
}

#[test]
fn displays_as_year_month() {
    let fm = FinancialMonth { year: 2024, month: 3 };
    assert_eq!(fm.to_string(), "2024-03");
}
