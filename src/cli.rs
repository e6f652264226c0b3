// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{expense_categories, income_sources};
use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn tags<'a>(it: impl Iterator<Item = &'a crate::categories::CategoryInfo>) -> String {
    it.map(|c| c.tag).collect::<Vec<_>>().join("|")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .short('a')
        .required(true)
        .allow_hyphen_values(true)
        .help("Amount, e.g. 125.50")
}

fn description_arg() -> Arg {
    Arg::new("description")
        .long("description")
        .short('d')
        .help("Free-form description")
}

pub fn build_cli() -> Command {
    Command::new("cashbook")
        .version(crate_version!())
        .about("Track expenses, cash on hand and savings goals")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (defaults to $CASHBOOK_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand(Command::new("init").about("Create the database and seed balances"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("expense")
                        .about("Record an expense")
                        .arg(amount_arg())
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .required(true)
                                .help(tags(expense_categories())),
                        )
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .short('m')
                                .default_value("cash")
                                .help("cash|card|other"),
                        )
                        .arg(description_arg()),
                )
                .subcommand(
                    Command::new("income")
                        .about("Record income (always settles in cash)")
                        .arg(amount_arg())
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .short('s')
                                .required(true)
                                .help(tags(income_sources())),
                        )
                        .arg(description_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("savings")
                .about("Record and list savings")
                .subcommand(
                    Command::new("add")
                        .about("Record a saving and credit the total balance")
                        .arg(amount_arg())
                        .arg(description_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list").about("Savings history, newest first"),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage the savings goal")
                .subcommand(
                    Command::new("set")
                        .about("Set (or replace) the savings goal")
                        .arg(amount_arg())
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Days to reach the goal"),
                        )
                        .arg(description_arg()),
                )
                .subcommand(json_flags(
                    Command::new("show").about("Show the goal and progress"),
                ))
                .subcommand(Command::new("clear").about("Remove the savings goal")),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Balances, weekly spend, savings and advice"),
        ))
        .subcommand(json_flags(
            Command::new("categories").about("Weekly spend per expense category"),
        ))
        .subcommand(json_flags(
            Command::new("advice").about("Recommendations for this week"),
        ))
        .subcommand(
            Command::new("export")
                .about("Export records")
                .subcommand(
                    Command::new("transactions")
                        .about("Export all transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(Command::new("show").about("Show current settings"))
                .subcommand(
                    Command::new("currency")
                        .about("Set the currency symbol used for display")
                        .arg(Arg::new("symbol").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
