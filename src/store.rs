// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{SavingEntry, SavingsGoal, Transaction};
use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

pub mod keys {
    pub const TRANSACTIONS: &str = "transactions";
    pub const SAVINGS: &str = "savings";
    pub const SAVINGS_GOAL: &str = "savings_goal";
    pub const CASH_BALANCE: &str = "cash_balance";
    pub const TOTAL_BALANCE: &str = "total_balance";
}

/// Raw JSON documents under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Whether anything is stored under `key`, readable or not.
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        (**self).contains(key)
    }
}

/// `kv` table in the cashbook database. Values are stored as JSON text.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Raw text for a key, without parsing. Used by diagnostics.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get::<_, String>(0)
            })
            .optional()?;
        Ok(v)
    }
}

impl KeyValueStore for SqliteStore<'_> {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Ok(Some(v)),
            Err(err) => {
                warn!("ignoring unparseable value under '{}': {}", key, err);
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value.to_string()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Typed access to the five cashbook keys. Missing or malformed values
/// read as their defaults.
pub struct Storage<S> {
    kv: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(value) = self.kv.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(v) => Ok(Some(v)),
            Err(err) => {
                warn!("ignoring malformed record under '{}': {}", key, err);
                Ok(None)
            }
        }
    }

    /// True when `key` holds something that does not decode as `T`.
    pub fn unreadable<T: DeserializeOwned>(&self, key: &str) -> Result<bool, StoreError> {
        if !self.kv.contains(key)? {
            return Ok(false);
        }
        Ok(match self.kv.get(key)? {
            Some(value) => serde_json::from_value::<T>(value).is_err(),
            None => true,
        })
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        debug!("write {}", key);
        self.kv.set(key, &json)
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.read(keys::TRANSACTIONS)?.unwrap_or_default())
    }

    pub fn save_transactions(&self, txs: &[Transaction]) -> Result<(), StoreError> {
        self.write(keys::TRANSACTIONS, &txs)
    }

    pub fn savings(&self) -> Result<Vec<SavingEntry>, StoreError> {
        Ok(self.read(keys::SAVINGS)?.unwrap_or_default())
    }

    pub fn save_savings(&self, savings: &[SavingEntry]) -> Result<(), StoreError> {
        self.write(keys::SAVINGS, &savings)
    }

    pub fn savings_goal(&self) -> Result<Option<SavingsGoal>, StoreError> {
        self.read(keys::SAVINGS_GOAL)
    }

    pub fn set_savings_goal(&self, goal: &SavingsGoal) -> Result<(), StoreError> {
        self.write(keys::SAVINGS_GOAL, goal)
    }

    pub fn clear_savings_goal(&self) -> Result<(), StoreError> {
        self.kv.remove(keys::SAVINGS_GOAL)
    }

    pub fn cash_balance(&self) -> Result<Decimal, StoreError> {
        Ok(self.read(keys::CASH_BALANCE)?.unwrap_or(Decimal::ZERO))
    }

    pub fn set_cash_balance(&self, amount: Decimal) -> Result<(), StoreError> {
        self.write(keys::CASH_BALANCE, &amount)
    }

    pub fn total_balance(&self) -> Result<Decimal, StoreError> {
        Ok(self.read(keys::TOTAL_BALANCE)?.unwrap_or(Decimal::ZERO))
    }

    pub fn set_total_balance(&self, amount: Decimal) -> Result<(), StoreError> {
        self.write(keys::TOTAL_BALANCE, &amount)
    }

    /// Seeds both balances with zero on first run. Existing data is never touched.
    pub fn bootstrap(&self) -> Result<bool, StoreError> {
        if self.kv.contains(keys::CASH_BALANCE)? {
            return Ok(false);
        }
        self.set_cash_balance(Decimal::ZERO)?;
        if !self.kv.contains(keys::TOTAL_BALANCE)? {
            self.set_total_balance(Decimal::ZERO)?;
        }
        Ok(true)
    }
}
