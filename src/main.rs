// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use cashbook::{cli, commands, db};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    let path = db::db_path(matches.get_one::<String>("db").map(Path::new))?;
    let conn = db::open_or_init(&path)?;
    commands::ledger(&conn).bootstrap()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&conn, sub)?,
        Some(("goal", sub)) => commands::goal::handle(&conn, sub)?,
        Some(("dashboard", sub)) => commands::reports::dashboard(&conn, sub)?,
        Some(("categories", sub)) => commands::reports::categories(&conn, sub)?,
        Some(("advice", sub)) => commands::reports::advice(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
