// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use uuid::Uuid;

/// Source of opaque unique identifiers for new ledger rows. Injected into the
/// engine so expansions stay deterministic under test.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs; the production generator.
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
