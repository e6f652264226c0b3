// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::clock::Clock;
use crate::error::LedgerError;
use crate::models::{
    Balances, PaymentMethod, SavingEntry, SavingsGoal, Transaction, TransactionKind,
};
use crate::store::{KeyValueStore, Storage, keys};
use chrono::{DateTime, Utc};
use log::{info, warn};
use rust_decimal::Decimal;

pub const DEFAULT_SAVING_DESCRIPTION: &str = "Additional saving";

/// Append-only records plus the running cash/total balances.
pub struct Ledger<S, C> {
    storage: Storage<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Ledger<S, C> {
    pub fn new(kv: S, clock: C) -> Self {
        Self {
            storage: Storage::new(kv),
            clock,
        }
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn bootstrap(&self) -> Result<bool, LedgerError> {
        Ok(self.storage.bootstrap()?)
    }

    pub fn balances(&self) -> Result<Balances, LedgerError> {
        Ok(Balances {
            cash_balance: self.storage.cash_balance()?,
            total_balance: self.storage.total_balance()?,
        })
    }

    pub fn add_transaction(
        &self,
        kind: TransactionKind,
        amount: Decimal,
        category: &str,
        payment_method: PaymentMethod,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        ensure_positive(amount)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::EmptyCategory);
        }
        // income is always cash-settled
        let payment_method = match kind {
            TransactionKind::Income => PaymentMethod::Cash,
            TransactionKind::Expense => payment_method,
        };
        let description = match description.trim() {
            "" => categories::default_description(category, kind).to_string(),
            d => d.to_string(),
        };

        let now = self.clock.now();
        let mut txs = self.storage.transactions()?;
        if txs.is_empty() && self.storage.unreadable::<Vec<Transaction>>(keys::TRANSACTIONS)? {
            warn!("replacing unreadable '{}' document", keys::TRANSACTIONS);
        }
        let tx = Transaction {
            id: next_id(now, txs.last().map(|t| t.id.as_str())),
            kind,
            amount,
            category: category.to_string(),
            payment_method,
            description,
            date: now,
        };
        let balances = self.balances_after(&tx)?;
        txs.push(tx.clone());
        self.storage.save_transactions(&txs)?;
        self.storage.set_cash_balance(balances.cash_balance)?;
        self.storage.set_total_balance(balances.total_balance)?;
        info!(
            "recorded {} {} in '{}' via {}",
            tx.kind, tx.amount, tx.category, tx.payment_method
        );
        Ok(tx)
    }

    pub fn add_income(
        &self,
        amount: Decimal,
        source: &str,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        self.add_transaction(
            TransactionKind::Income,
            amount,
            source,
            PaymentMethod::Cash,
            description,
        )
    }

    pub fn add_expense(
        &self,
        amount: Decimal,
        category: &str,
        method: PaymentMethod,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        self.add_transaction(TransactionKind::Expense, amount, category, method, description)
    }

    /// Balances once `tx` is applied. Nothing is written.
    fn balances_after(&self, tx: &Transaction) -> Result<Balances, LedgerError> {
        let Balances {
            mut cash_balance,
            mut total_balance,
        } = self.balances()?;
        match tx.kind {
            TransactionKind::Income => {
                cash_balance = checked(cash_balance.checked_add(tx.amount), tx.amount)?;
                total_balance = checked(total_balance.checked_add(tx.amount), tx.amount)?;
            }
            TransactionKind::Expense => {
                total_balance = checked(total_balance.checked_sub(tx.amount), tx.amount)?;
                if tx.payment_method == PaymentMethod::Cash {
                    cash_balance = checked(cash_balance.checked_sub(tx.amount), tx.amount)?;
                }
            }
        }
        Ok(Balances {
            cash_balance,
            total_balance,
        })
    }

    /// Records a saving. Balances are left alone; crediting them is up to the caller.
    pub fn add_saving(&self, amount: Decimal, description: &str) -> Result<SavingEntry, LedgerError> {
        ensure_positive(amount)?;
        let description = match description.trim() {
            "" => DEFAULT_SAVING_DESCRIPTION.to_string(),
            d => d.to_string(),
        };
        let now = self.clock.now();
        let mut savings = self.storage.savings()?;
        if savings.is_empty() && self.storage.unreadable::<Vec<SavingEntry>>(keys::SAVINGS)? {
            warn!("replacing unreadable '{}' document", keys::SAVINGS);
        }
        let entry = SavingEntry {
            id: next_id(now, savings.last().map(|s| s.id.as_str())),
            amount,
            description,
            date: now,
        };
        savings.push(entry.clone());
        self.storage.save_savings(&savings)?;
        info!("recorded saving {}", entry.amount);
        Ok(entry)
    }

    /// Records a saving and credits it to the total balance. The credit is
    /// checked before the saving is written.
    pub fn add_saving_to_total(
        &self,
        amount: Decimal,
        description: &str,
    ) -> Result<(SavingEntry, Decimal), LedgerError> {
        ensure_positive(amount)?;
        let total = checked(self.storage.total_balance()?.checked_add(amount), amount)?;
        let entry = self.add_saving(amount, description)?;
        self.storage.set_total_balance(total)?;
        Ok((entry, total))
    }

    pub fn credit_total_balance(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        let total = checked(self.storage.total_balance()?.checked_add(amount), amount)?;
        self.storage.set_total_balance(total)?;
        Ok(total)
    }

    pub fn credit_cash_balance(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        let cash = checked(self.storage.cash_balance()?.checked_add(amount), amount)?;
        self.storage.set_cash_balance(cash)?;
        Ok(cash)
    }

    pub fn set_savings_goal(
        &self,
        amount: Decimal,
        days: i64,
        description: &str,
    ) -> Result<SavingsGoal, LedgerError> {
        ensure_positive(amount)?;
        let days = u32::try_from(days)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or(LedgerError::InvalidGoalDays(days))?;
        let goal = SavingsGoal {
            amount,
            days,
            description: description.trim().to_string(),
            created_at: self.clock.now(),
            daily_amount: amount / Decimal::from(days),
        };
        self.storage.set_savings_goal(&goal)?;
        info!("savings goal set: {} over {} days", goal.amount, goal.days);
        Ok(goal)
    }

    pub fn clear_savings_goal(&self) -> Result<(), LedgerError> {
        self.storage.clear_savings_goal()?;
        info!("savings goal cleared");
        Ok(())
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    Ok(())
}

fn checked(result: Option<Decimal>, amount: Decimal) -> Result<Decimal, LedgerError> {
    result.ok_or(LedgerError::AmountOutOfRange(amount))
}

/// Millisecond timestamp id, bumped past the previous id when the clock has
/// not moved on.
fn next_id(now: DateTime<Utc>, last: Option<&str>) -> String {
    let candidate = now.timestamp_millis();
    let floor = last
        .and_then(|s| s.parse::<i64>().ok())
        .map(|v| v.saturating_add(1));
    match floor {
        Some(f) if f > candidate => f.to_string(),
        _ => candidate.to_string(),
    }
}
