// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::utils::{get_currency_symbol, pretty_table, set_currency_symbol};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![vec![
                "currency_symbol".to_string(),
                get_currency_symbol(conn)?,
            ]];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("currency", sub)) => {
            let symbol = required(sub, "symbol")?;
            if symbol.is_empty() {
                bail!("Currency symbol must not be empty");
            }
            set_currency_symbol(conn, symbol)?;
            println!("Currency symbol set to {}", symbol);
        }
        _ => {}
    }
    Ok(())
}
