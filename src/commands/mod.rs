// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod config;
pub mod doctor;
pub mod exporter;
pub mod goal;
pub mod reports;
pub mod savings;
pub mod transactions;

use crate::clock::SystemClock;
use crate::ledger::Ledger;
use crate::store::SqliteStore;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub type SqliteLedger<'c> = Ledger<SqliteStore<'c>, SystemClock>;

pub fn ledger(conn: &Connection) -> SqliteLedger<'_> {
    Ledger::new(SqliteStore::new(conn), SystemClock)
}

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("Missing required argument --{}", name))
}

pub(crate) fn optional<'a>(sub: &'a clap::ArgMatches, name: &str) -> &'a str {
    sub.get_one::<String>(name).map(|s| s.trim()).unwrap_or("")
}
