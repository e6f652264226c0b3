// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ledger, required};
use anyhow::{Context, Result, bail};
use log::info;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;

    // oldest first, in recording order
    let txs = ledger(conn).storage().transactions()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out))?;
            wtr.write_record([
                "id",
                "date",
                "type",
                "category",
                "payment_method",
                "amount",
                "description",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_rfc3339(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.payment_method.to_string(),
                    t.amount.to_string(),
                    t.description.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!("exported {} transactions to {}", txs.len(), out);
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
