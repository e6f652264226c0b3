// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::commands::{self, exporter};
use cashbook::models::PaymentMethod;
use cashbook::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let ledger = commands::ledger(&conn);
    ledger.bootstrap().unwrap();
    ledger
        .add_income(Decimal::from(1000), "work", "Paycheck")
        .unwrap();
    ledger
        .add_expense(
            Decimal::from_str_exact("12.34").unwrap(),
            "food",
            PaymentMethod::Card,
            "Corner shop, weekly run",
        )
        .unwrap();
    conn
}

fn export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "cashbook",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_as_json_in_recording_order() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");

    export(&conn, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "income");
    assert_eq!(items[0]["paymentMethod"], "cash");
    assert_eq!(items[1]["type"], "expense");
    assert_eq!(items[1]["amount"], "12.34");
    assert_eq!(items[1]["category"], "food");
}

#[test]
fn export_transactions_as_csv_quotes_fields() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");

    export(&conn, "CSV", &out_path.to_string_lossy()).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "date", "type", "category", "payment_method", "amount", "description"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[1][2], "expense");
    assert_eq!(&records[1][4], "card");
    assert_eq!(&records[1][5], "12.34");
    assert_eq!(&records[1][6], "Corner shop, weekly run");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");

    assert!(export(&conn, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
