// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Day of month on which a new financial month begins when the user has not
/// configured one.
pub const DEFAULT_MONTH_START_DAY: u32 = 11;

/// The accounting period a transaction counts toward. Need not align with the
/// calendar month: with a start day of 11, May 10 belongs to April and May 11
/// to May. Every filtering, reporting, and export path buckets dates through
/// this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FinancialMonth {
    pub year: i32,
    pub month: u32,
}

impl FinancialMonth {
    /// Buckets a calendar date given the configured start day (1-31). Days
    /// before the start day fall into the preceding month, with January
    /// wrapping to December of the previous year.
    pub fn of(date: NaiveDate, start_day: u32) -> FinancialMonth {
        if date.day() < start_day {
            if date.month() == 1 {
                FinancialMonth {
                    year: date.year() - 1,
                    month: 12,
                }
            } else {
                FinancialMonth {
                    year: date.year(),
                    month: date.month() - 1,
                }
            }
        } else {
            FinancialMonth {
                year: date.year(),
                month: date.month(),
            }
        }
    }

    /// The bucket "today" falls into.
    pub fn current(today: NaiveDate, start_day: u32) -> FinancialMonth {
        FinancialMonth::of(today, start_day)
    }
}

impl fmt::Display for FinancialMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
