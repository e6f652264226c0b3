// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ledger, optional, required};
use crate::aggregator::history;
use crate::categories::display_label;
use crate::models::{PaymentMethod, TransactionKind};
use crate::utils::{
    fmt_date, fmt_money, get_currency_symbol, maybe_print_json, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expense", sub)) => expense(conn, sub)?,
        Some(("income", sub)) => income(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn expense(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category = required(sub, "category")?;
    let method: PaymentMethod = required(sub, "method")?.parse()?;
    let description = optional(sub, "description");

    let tx = ledger(conn).add_expense(amount, category, method, description)?;
    let symbol = get_currency_symbol(conn)?;
    println!(
        "Recorded expense {} in {} ({}) via {}",
        fmt_money(&tx.amount, &symbol),
        display_label(&tx.category),
        tx.description,
        tx.payment_method
    );
    Ok(())
}

fn income(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let source = required(sub, "source")?;
    let description = optional(sub, "description");

    let tx = ledger(conn).add_income(amount, source, description)?;
    let symbol = get_currency_symbol(conn)?;
    println!(
        "Recorded income {} from {} ({})",
        fmt_money(&tx.amount, &symbol),
        display_label(&tx.category),
        tx.description
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions recorded yet. Add your first expense or income.");
            return Ok(());
        }
        let symbol = get_currency_symbol(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = match r.kind {
                    TransactionKind::Expense => "-",
                    TransactionKind::Income => "+",
                };
                vec![
                    r.date.clone(),
                    display_label(&r.category),
                    r.description.clone(),
                    r.method.to_string(),
                    format!("{}{}", sign, fmt_money(&r.amount, &symbol)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Description", "Method", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: TransactionKind,
    pub category: String,
    pub method: PaymentMethod,
    pub description: String,
    pub amount: rust_decimal::Decimal,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "all");
    let limit = sub.get_one::<usize>("limit").copied();

    let txs = ledger(conn).storage().transactions()?;
    let data = history(&txs, category, limit)
        .into_iter()
        .map(|t| TransactionRow {
            date: fmt_date(&t.date),
            id: t.id,
            kind: t.kind,
            category: t.category,
            method: t.payment_method,
            description: t.description,
            amount: t.amount,
        })
        .collect();
    Ok(data)
}
