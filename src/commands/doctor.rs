// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ledger;
use crate::aggregator::total_savings;
use crate::models::{PaymentMethod, SavingEntry, SavingsGoal, Transaction, TransactionKind};
use crate::store::{SqliteStore, keys};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub code: &'static str,
    pub detail: String,
}

fn check_shape<T: DeserializeOwned>(store: &SqliteStore<'_>, key: &str, out: &mut Vec<Issue>) -> Result<()> {
    let Some(raw) = store.get_raw(key)? else {
        return Ok(());
    };
    if let Err(err) = serde_json::from_str::<T>(&raw) {
        out.push(Issue {
            code: "corrupt_record",
            detail: format!("{}: {}", key, err),
        });
    }
    Ok(())
}

/// Corrupt keys, and running balances that no longer match the recorded history.
pub fn diagnose(conn: &Connection) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    let store = SqliteStore::new(conn);

    check_shape::<Vec<Transaction>>(&store, keys::TRANSACTIONS, &mut issues)?;
    check_shape::<Vec<SavingEntry>>(&store, keys::SAVINGS, &mut issues)?;
    check_shape::<SavingsGoal>(&store, keys::SAVINGS_GOAL, &mut issues)?;
    check_shape::<Decimal>(&store, keys::CASH_BALANCE, &mut issues)?;
    check_shape::<Decimal>(&store, keys::TOTAL_BALANCE, &mut issues)?;

    let ledger = ledger(conn);
    let storage = ledger.storage();
    let txs = storage.transactions()?;
    let saved = total_savings(&storage.savings()?);

    let mut expected_cash = Decimal::ZERO;
    let mut expected_total = saved;
    for t in &txs {
        match t.kind {
            TransactionKind::Income => {
                expected_cash = expected_cash.saturating_add(t.amount);
                expected_total = expected_total.saturating_add(t.amount);
            }
            TransactionKind::Expense => {
                expected_total = expected_total.saturating_sub(t.amount);
                if t.payment_method == PaymentMethod::Cash {
                    expected_cash = expected_cash.saturating_sub(t.amount);
                }
            }
        }
    }

    let cash = storage.cash_balance()?;
    if cash != expected_cash {
        issues.push(Issue {
            code: "cash_balance_drift",
            detail: format!("stored {} vs history {}", cash, expected_cash),
        });
    }
    let total = storage.total_balance()?;
    if total != expected_total {
        issues.push(Issue {
            code: "total_balance_drift",
            detail: format!("stored {} vs history {}", total, expected_total),
        });
    }
    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = diagnose(conn)?;
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.code.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
