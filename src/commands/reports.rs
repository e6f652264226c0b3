// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ledger;
use crate::aggregator::{Aggregator, Dashboard};
use crate::utils::{fmt_money, fmt_percent, get_currency_symbol, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn load_dashboard(conn: &Connection) -> Result<Dashboard> {
    let ledger = ledger(conn);
    Ok(Aggregator::new(ledger.storage()).dashboard(ledger.now())?)
}

pub fn dashboard(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let d = load_dashboard(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let mut rows = vec![
        vec![
            "Current balance".to_string(),
            fmt_money(&d.balances.total_balance, &symbol),
        ],
        vec![
            "Cash on hand".to_string(),
            fmt_money(&d.balances.cash_balance, &symbol),
        ],
        vec![
            "Spent this week".to_string(),
            fmt_money(&d.weekly_expenses, &symbol),
        ],
        vec!["Total saved".to_string(), fmt_money(&d.total_savings, &symbol)],
    ];
    if let (Some(goal), Some(progress)) = (&d.goal, &d.goal_progress_percent) {
        rows.push(vec![
            format!("Goal: {}", goal.description),
            format!(
                "{} of {}",
                fmt_percent(progress),
                fmt_money(&goal.amount, &symbol)
            ),
        ]);
    }
    println!("{}", pretty_table(&["Summary", ""], rows));
    print_breakdown(&d, &symbol);
    print_advice(&d);
    Ok(())
}

pub fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let d = load_dashboard(conn)?;
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &d.breakdown.categories,
    )? {
        return Ok(());
    }
    print_breakdown(&d, &get_currency_symbol(conn)?);
    Ok(())
}

pub fn advice(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let d = load_dashboard(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d.recommendations)? {
        return Ok(());
    }
    print_advice(&d);
    Ok(())
}

fn print_breakdown(d: &Dashboard, symbol: &str) {
    let rows: Vec<Vec<String>> = d
        .breakdown
        .categories
        .iter()
        .map(|c| {
            vec![
                format!("{} {}", c.icon, c.label),
                fmt_money(&c.amount, symbol),
                format!("{} of total", fmt_percent(&c.share_percent)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "This week", "Share"], rows)
    );
}

fn print_advice(d: &Dashboard) {
    let rows: Vec<Vec<String>> = d
        .recommendations
        .iter()
        .map(|r| vec![r.icon.to_string(), r.message.clone()])
        .collect();
    println!("{}", pretty_table(&["", "Recommendation"], rows));
}
