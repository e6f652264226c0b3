// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ledger, optional, required};
use crate::aggregator::{savings_history, total_savings};
use crate::utils::{
    fmt_date, fmt_money, get_currency_symbol, maybe_print_json, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let description = optional(sub, "description");

    // savings count toward the total balance only, never the cash balance
    let (entry, total) = ledger(conn).add_saving_to_total(amount, description)?;

    let symbol = get_currency_symbol(conn)?;
    println!(
        "Saved {} ({}); total balance now {}",
        fmt_money(&entry.amount, &symbol),
        entry.description,
        fmt_money(&total, &symbol)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let savings = ledger(conn).storage().savings()?;
    let data = savings_history(&savings);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No savings recorded yet. Start by adding your first saving.");
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|s| {
            vec![
                fmt_date(&s.date),
                s.description.clone(),
                format!("+{}", fmt_money(&s.amount, &symbol)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Description", "Amount"], rows));
    println!("Total saved: {}", fmt_money(&total_savings(&savings), &symbol));
    Ok(())
}
