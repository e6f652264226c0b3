// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::db;
use cashbook::models::{PaymentMethod, SavingEntry, SavingsGoal, Transaction, TransactionKind};
use cashbook::store::{KeyValueStore, MemoryStore, SqliteStore, Storage, keys};
use chrono::{TimeZone, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde_json::json;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn sample_tx() -> Transaction {
    Transaction {
        id: "1741608000000".into(),
        kind: TransactionKind::Expense,
        amount: Decimal::from_str_exact("12.34").unwrap(),
        category: "food".into(),
        payment_method: PaymentMethod::Card,
        description: "Lunch".into(),
        date: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
    }
}

#[test]
fn missing_keys_read_as_defaults() {
    let conn = setup();
    let storage = Storage::new(SqliteStore::new(&conn));
    assert!(storage.transactions().unwrap().is_empty());
    assert!(storage.savings().unwrap().is_empty());
    assert!(storage.savings_goal().unwrap().is_none());
    assert!(storage.cash_balance().unwrap().is_zero());
    assert!(storage.total_balance().unwrap().is_zero());
}

#[test]
fn every_key_round_trips_through_sqlite() {
    let conn = setup();
    let storage = Storage::new(SqliteStore::new(&conn));

    let txs = vec![sample_tx()];
    let savings = vec![SavingEntry {
        id: "1".into(),
        amount: Decimal::from_str_exact("150.50").unwrap(),
        description: "Piggy bank".into(),
        date: Utc.with_ymd_and_hms(2025, 3, 9, 8, 30, 0).unwrap(),
    }];
    let goal = SavingsGoal {
        amount: Decimal::from(3000),
        days: 30,
        description: "Laptop".into(),
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        daily_amount: Decimal::from(100),
    };
    let cash = Decimal::from_str_exact("-0.10").unwrap();
    let total = Decimal::from_str_exact("1234.5678").unwrap();

    storage.save_transactions(&txs).unwrap();
    storage.save_savings(&savings).unwrap();
    storage.set_savings_goal(&goal).unwrap();
    storage.set_cash_balance(cash).unwrap();
    storage.set_total_balance(total).unwrap();

    assert_eq!(storage.transactions().unwrap(), txs);
    assert_eq!(storage.savings().unwrap(), savings);
    assert_eq!(storage.savings_goal().unwrap(), Some(goal));
    assert_eq!(storage.cash_balance().unwrap(), cash);
    assert_eq!(storage.total_balance().unwrap(), total);

    storage.clear_savings_goal().unwrap();
    assert!(storage.savings_goal().unwrap().is_none());
}

#[test]
fn transactions_use_camel_case_document_shape() {
    let store = MemoryStore::new();
    let storage = Storage::new(&store);
    storage.save_transactions(&[sample_tx()]).unwrap();

    let raw = store.get(keys::TRANSACTIONS).unwrap().unwrap();
    assert_eq!(
        raw,
        json!([{
            "id": "1741608000000",
            "type": "expense",
            "amount": "12.34",
            "category": "food",
            "paymentMethod": "card",
            "description": "Lunch",
            "date": "2025-03-10T12:00:00Z"
        }])
    );
}

#[test]
fn numeric_balances_written_by_other_tools_are_accepted() {
    let store = MemoryStore::new();
    store.set(keys::CASH_BALANCE, &json!(250.5)).unwrap();
    store.set(keys::TOTAL_BALANCE, &json!("900")).unwrap();
    let storage = Storage::new(&store);
    assert_eq!(
        storage.cash_balance().unwrap(),
        Decimal::from_str_exact("250.5").unwrap()
    );
    assert_eq!(storage.total_balance().unwrap(), Decimal::from(900));
}

#[test]
fn corrupt_values_fall_back_to_defaults() {
    let conn = setup();
    for (key, raw) in [
        (keys::TRANSACTIONS, "{not json"),
        (keys::SAVINGS, r#"{"unexpected": true}"#),
        (keys::SAVINGS_GOAL, r#"[1,2,3]"#),
        (keys::CASH_BALANCE, r#""abc""#),
        (keys::TOTAL_BALANCE, "NaN"),
    ] {
        conn.execute(
            "INSERT INTO kv(key, value) VALUES (?1, ?2)",
            params![key, raw],
        )
        .unwrap();
    }

    let storage = Storage::new(SqliteStore::new(&conn));
    assert!(storage.transactions().unwrap().is_empty());
    assert!(storage.savings().unwrap().is_empty());
    assert!(storage.savings_goal().unwrap().is_none());
    assert!(storage.cash_balance().unwrap().is_zero());
    assert!(storage.total_balance().unwrap().is_zero());
}

#[test]
fn bootstrap_only_seeds_on_first_run() {
    let conn = setup();
    let storage = Storage::new(SqliteStore::new(&conn));

    assert!(storage.bootstrap().unwrap());
    let cash: String = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![keys::CASH_BALANCE], |r| r.get(0))
        .unwrap();
    assert_eq!(cash, r#""0""#);

    storage.set_cash_balance(Decimal::from(42)).unwrap();
    storage.set_total_balance(Decimal::from(77)).unwrap();
    assert!(!storage.bootstrap().unwrap());
    assert_eq!(storage.cash_balance().unwrap(), Decimal::from(42));
    assert_eq!(storage.total_balance().unwrap(), Decimal::from(77));
}

#[test]
fn remove_is_a_no_op_for_missing_keys() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    store.remove(keys::SAVINGS_GOAL).unwrap();
    store.set(keys::SAVINGS_GOAL, &json!({"x": 1})).unwrap();
    assert_eq!(store.get(keys::SAVINGS_GOAL).unwrap(), Some(json!({"x": 1})));
    store.remove(keys::SAVINGS_GOAL).unwrap();
    assert!(store.get(keys::SAVINGS_GOAL).unwrap().is_none());
}

#[test]
fn bootstrap_leaves_unreadable_balances_for_diagnosis() {
    let conn = setup();
    conn.execute(
        "INSERT INTO kv(key, value) VALUES (?1, ?2)",
        params![keys::CASH_BALANCE, "{broken"],
    )
    .unwrap();
    let storage = Storage::new(SqliteStore::new(&conn));

    assert!(!storage.bootstrap().unwrap());
    let raw = SqliteStore::new(&conn).get_raw(keys::CASH_BALANCE).unwrap();
    assert_eq!(raw.as_deref(), Some("{broken"));
    assert!(SqliteStore::new(&conn).contains(keys::CASH_BALANCE).unwrap());
    assert!(!SqliteStore::new(&conn).contains(keys::TOTAL_BALANCE).unwrap());
    assert!(storage.unreadable::<Decimal>(keys::CASH_BALANCE).unwrap());
}
