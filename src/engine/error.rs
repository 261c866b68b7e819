// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Validation failures raised before any ledger entry is constructed. The
/// caller decides how to surface them; nothing partial is ever returned
/// alongside one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    #[error("Amount must be a positive number")]
    InvalidAmount,
    #[error("A name is required")]
    MissingName,
    #[error("A category is required")]
    MissingCategory,
    #[error("A payment source is required")]
    MissingPaymentSource,
    #[error("No active profile")]
    MissingOwner,
    #[error("At least 2 installments are required")]
    TooFewInstallments,
}
