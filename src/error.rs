// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejections raised at the ledger boundary before anything is persisted.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("amount {0} would push a balance out of range")]
    AmountOutOfRange(Decimal),
    #[error("goal duration must be at least 1 day, got {0}")]
    InvalidGoalDays(i64),
    #[error("category must not be empty")]
    EmptyCategory,
    #[error(transparent)]
    Store(#[from] StoreError),
}
