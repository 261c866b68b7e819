// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    OneTime,
    Installment,
    Recurring,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::OneTime => "one-time",
            PaymentType::Installment => "installment",
            PaymentType::Recurring => "recurring",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentType> {
        match s {
            "one-time" => Some(PaymentType::OneTime),
            "installment" => Some(PaymentType::Installment),
            "recurring" => Some(PaymentType::Recurring),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    Monthly,
}

impl RecurrenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceType::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<RecurrenceType> {
        match s {
            "monthly" => Some(RecurrenceType::Monthly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub category_id: String,
    pub payment_source_id: String,
    pub payment_type: PaymentType,
    pub owner_id: String,
    pub installment_number: Option<u32>,
    pub total_installments: Option<u32>,
    pub related_expense_id: Option<String>,
    pub recurrence_id: Option<String>,
    pub recurrence_type: Option<RecurrenceType>,
    pub recurring_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn is_installment(&self) -> bool {
        matches!(self.payment_type, PaymentType::Installment)
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self.payment_type, PaymentType::Recurring)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Cash,
    Credit,
    Bank,
    Other,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Cash => "cash",
            SourceType::Credit => "credit",
            SourceType::Bank => "bank",
            SourceType::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<SourceType> {
        match s {
            "cash" => Some(SourceType::Cash),
            "credit" => Some(SourceType::Credit),
            "bank" => Some(SourceType::Bank),
            "other" => Some(SourceType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSource {
    pub id: String,
    pub name: String,
    pub r#type: SourceType,
    pub color: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
