// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ledger, optional, required};
use crate::aggregator::Aggregator;
use crate::models::SavingsGoal;
use crate::utils::{
    fmt_money, fmt_percent, get_currency_symbol, maybe_print_json, parse_days, parse_decimal,
    pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("clear", _)) => {
            ledger(conn).clear_savings_goal()?;
            println!("Savings goal cleared");
        }
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let days = parse_days(required(sub, "days")?)?;
    let description = optional(sub, "description");

    let goal = ledger(conn).set_savings_goal(amount, days, description)?;
    let symbol = get_currency_symbol(conn)?;
    println!(
        "Savings goal set: {} in {} days; save {} per day",
        fmt_money(&goal.amount, &symbol),
        goal.days,
        fmt_money(&goal.daily_amount, &symbol)
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    pub goal: Option<SavingsGoal>,
    pub total_savings: Decimal,
    pub progress_percent: Option<Decimal>,
}

pub fn goal_status(conn: &Connection) -> Result<GoalStatus> {
    let ledger = ledger(conn);
    let agg = Aggregator::new(ledger.storage());
    Ok(GoalStatus {
        goal: ledger.storage().savings_goal()?,
        total_savings: agg.total_savings()?,
        progress_percent: agg.goal_progress_percent()?,
    })
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let status = goal_status(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &status)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let Some(goal) = status.goal else {
        println!("No active goal");
        println!("Total saved: {}", fmt_money(&status.total_savings, &symbol));
        return Ok(());
    };
    let progress = status.progress_percent.unwrap_or(Decimal::ZERO);
    let rows = vec![
        vec!["Goal".to_string(), goal.description.clone()],
        vec![
            "Target".to_string(),
            format!("{} in {} days", fmt_money(&goal.amount, &symbol), goal.days),
        ],
        vec!["Per day".to_string(), fmt_money(&goal.daily_amount, &symbol)],
        vec!["Saved".to_string(), fmt_money(&status.total_savings, &symbol)],
        vec!["Progress".to_string(), format!("{} completed", fmt_percent(&progress))],
    ];
    println!("{}", pretty_table(&["Savings goal", ""], rows));
    Ok(())
}
