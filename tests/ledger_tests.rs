// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::clock::FixedClock;
use cashbook::error::LedgerError;
use cashbook::ledger::Ledger;
use cashbook::models::{PaymentMethod, Transaction, TransactionKind};
use cashbook::store::{KeyValueStore, MemoryStore, keys};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn setup() -> Ledger<MemoryStore, FixedClock> {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());
    let ledger = Ledger::new(MemoryStore::new(), clock);
    ledger.bootstrap().unwrap();
    ledger
}

#[test]
fn income_then_cash_and_card_expenses() {
    let ledger = setup();

    ledger.add_income(dec("1000"), "work", "").unwrap();
    let b = ledger.balances().unwrap();
    assert_eq!(b.cash_balance, dec("1000"));
    assert_eq!(b.total_balance, dec("1000"));

    ledger
        .add_expense(dec("200"), "food", PaymentMethod::Cash, "")
        .unwrap();
    let b = ledger.balances().unwrap();
    assert_eq!(b.cash_balance, dec("800"));
    assert_eq!(b.total_balance, dec("800"));

    ledger
        .add_expense(dec("300"), "university", PaymentMethod::Card, "")
        .unwrap();
    let b = ledger.balances().unwrap();
    assert_eq!(b.cash_balance, dec("800"));
    assert_eq!(b.total_balance, dec("500"));
}

#[test]
fn balances_track_signed_sums_over_mixed_sequence() {
    let ledger = setup();
    let ops = [
        (TransactionKind::Income, "250.40", PaymentMethod::Cash),
        (TransactionKind::Expense, "12.10", PaymentMethod::Card),
        (TransactionKind::Expense, "40.00", PaymentMethod::Cash),
        (TransactionKind::Income, "99.99", PaymentMethod::Card),
        (TransactionKind::Expense, "7.25", PaymentMethod::Other),
        (TransactionKind::Expense, "300", PaymentMethod::Cash),
    ];

    let mut total = Decimal::ZERO;
    let mut cash = Decimal::ZERO;
    for (kind, amount, method) in ops {
        let amount = dec(amount);
        ledger
            .add_transaction(kind, amount, "food", method, "")
            .unwrap();
        match kind {
            TransactionKind::Income => {
                total += amount;
                cash += amount;
            }
            TransactionKind::Expense => {
                total -= amount;
                if method == PaymentMethod::Cash {
                    cash -= amount;
                }
            }
        }
    }

    let b = ledger.balances().unwrap();
    assert_eq!(b.total_balance, total);
    assert_eq!(b.cash_balance, cash);
    // cash can go negative; nothing clamps it
    assert_eq!(b.cash_balance, dec("10.39"));
}

#[test]
fn income_is_always_recorded_as_cash() {
    let ledger = setup();
    let tx = ledger
        .add_transaction(
            TransactionKind::Income,
            dec("50"),
            "family",
            PaymentMethod::Card,
            "",
        )
        .unwrap();
    assert_eq!(tx.payment_method, PaymentMethod::Cash);
    assert_eq!(ledger.balances().unwrap().cash_balance, dec("50"));
}

#[test]
fn blank_description_falls_back_to_category_default() {
    let ledger = setup();
    let tx = ledger
        .add_expense(dec("5"), "transport", PaymentMethod::Cash, "  ")
        .unwrap();
    assert_eq!(tx.description, "Transport");
    let tx = ledger.add_income(dec("5"), "lottery", "").unwrap();
    assert_eq!(tx.description, "Additional income");
    let tx = ledger
        .add_expense(dec("5"), "food", PaymentMethod::Cash, "Lunch")
        .unwrap();
    assert_eq!(tx.description, "Lunch");
}

#[test]
fn invalid_input_is_rejected_without_side_effects() {
    let ledger = setup();

    let err = ledger
        .add_expense(dec("-5"), "food", PaymentMethod::Cash, "")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NonPositiveAmount(_)));
    let err = ledger.add_income(Decimal::ZERO, "work", "").unwrap_err();
    assert!(matches!(err, LedgerError::NonPositiveAmount(_)));
    let err = ledger
        .add_expense(dec("5"), " ", PaymentMethod::Cash, "")
        .unwrap_err();
    assert!(matches!(err, LedgerError::EmptyCategory));
    assert!(matches!(
        ledger.add_saving(dec("0"), "").unwrap_err(),
        LedgerError::NonPositiveAmount(_)
    ));

    assert!(ledger.storage().transactions().unwrap().is_empty());
    assert!(ledger.storage().savings().unwrap().is_empty());
    let b = ledger.balances().unwrap();
    assert!(b.cash_balance.is_zero());
    assert!(b.total_balance.is_zero());
}

#[test]
fn records_are_appended_with_clock_time_and_increasing_ids() {
    let ledger = setup();
    let first = ledger.add_income(dec("10"), "work", "").unwrap();
    // same instant: id still has to move forward
    let second = ledger
        .add_expense(dec("1"), "food", PaymentMethod::Cash, "")
        .unwrap();
    ledger.clock().advance(Duration::minutes(5));
    let third = ledger
        .add_expense(dec("1"), "food", PaymentMethod::Cash, "")
        .unwrap();

    assert_eq!(first.date, Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());
    assert_eq!(third.date, first.date + Duration::minutes(5));
    let ids: Vec<i64> = [&first, &second, &third]
        .iter()
        .map(|t| t.id.parse().unwrap())
        .collect();
    assert!(ids[0] < ids[1] && ids[1] < ids[2]);
    assert_eq!(ids[0], first.date.timestamp_millis());

    let stored = ledger.storage().transactions().unwrap();
    assert_eq!(stored, vec![first, second, third]);
}

#[test]
fn savings_leave_balances_alone_until_credited() {
    let ledger = setup();
    ledger.add_income(dec("500"), "work", "").unwrap();

    let entry = ledger.add_saving(dec("150"), "").unwrap();
    assert_eq!(entry.description, "Additional saving");
    let b = ledger.balances().unwrap();
    assert_eq!(b.cash_balance, dec("500"));
    assert_eq!(b.total_balance, dec("500"));

    ledger.credit_total_balance(entry.amount).unwrap();
    let b = ledger.balances().unwrap();
    assert_eq!(b.cash_balance, dec("500"));
    assert_eq!(b.total_balance, dec("650"));

    ledger.credit_cash_balance(dec("25")).unwrap();
    assert_eq!(ledger.balances().unwrap().cash_balance, dec("525"));
}

#[test]
fn savings_goal_computes_daily_amount_and_overwrites() {
    let ledger = setup();
    let goal = ledger
        .set_savings_goal(dec("3000"), 30, "Laptop")
        .unwrap();
    assert_eq!(goal.daily_amount, dec("100"));
    assert_eq!(format!("{:.2}", goal.daily_amount), "100.00");
    assert_eq!(goal.created_at, ledger.now());

    ledger.set_savings_goal(dec("100"), 3, "Books").unwrap();
    let stored = ledger.storage().savings_goal().unwrap().unwrap();
    assert_eq!(stored.description, "Books");
    assert_eq!(stored.days, 3);
    assert_eq!(stored.daily_amount.round_dp(2), dec("33.33"));

    ledger.clear_savings_goal().unwrap();
    assert!(ledger.storage().savings_goal().unwrap().is_none());
}

#[test]
fn savings_goal_rejects_bad_duration_and_amount() {
    let ledger = setup();
    assert!(matches!(
        ledger.set_savings_goal(dec("100"), 0, "").unwrap_err(),
        LedgerError::InvalidGoalDays(0)
    ));
    assert!(matches!(
        ledger.set_savings_goal(dec("100"), -4, "").unwrap_err(),
        LedgerError::InvalidGoalDays(-4)
    ));
    assert!(matches!(
        ledger.set_savings_goal(dec("0"), 10, "").unwrap_err(),
        LedgerError::NonPositiveAmount(_)
    ));
    assert!(ledger.storage().savings_goal().unwrap().is_none());
}

#[test]
fn overflowing_amounts_are_rejected_before_any_write() {
    let ledger = setup();
    ledger.add_income(Decimal::MAX, "work", "").unwrap();

    let err = ledger.add_income(dec("1"), "work", "").unwrap_err();
    assert!(matches!(err, LedgerError::AmountOutOfRange(_)));
    assert_eq!(ledger.storage().transactions().unwrap().len(), 1);
    let b = ledger.balances().unwrap();
    assert_eq!(b.cash_balance, Decimal::MAX);
    assert_eq!(b.total_balance, Decimal::MAX);

    assert!(matches!(
        ledger.credit_total_balance(dec("1")).unwrap_err(),
        LedgerError::AmountOutOfRange(_)
    ));
    assert!(matches!(
        ledger.credit_cash_balance(dec("1")).unwrap_err(),
        LedgerError::AmountOutOfRange(_)
    ));
    assert!(matches!(
        ledger.add_saving_to_total(dec("1"), "").unwrap_err(),
        LedgerError::AmountOutOfRange(_)
    ));
    assert!(ledger.storage().savings().unwrap().is_empty());
    assert_eq!(ledger.balances().unwrap().total_balance, Decimal::MAX);
}

#[test]
fn overdrawn_balances_stop_at_the_lower_bound() {
    let ledger = setup();
    ledger
        .add_expense(Decimal::MAX, "food", PaymentMethod::Card, "")
        .unwrap();
    let err = ledger
        .add_expense(Decimal::MAX, "food", PaymentMethod::Card, "")
        .unwrap_err();
    assert!(matches!(err, LedgerError::AmountOutOfRange(_)));
    assert_eq!(ledger.storage().transactions().unwrap().len(), 1);
    let b = ledger.balances().unwrap();
    assert!(b.cash_balance.is_zero());
    assert_eq!(b.total_balance, Decimal::MIN);
}

#[test]
fn saving_to_total_credits_total_only() {
    let ledger = setup();
    ledger.add_income(dec("100"), "work", "").unwrap();
    let (entry, total) = ledger.add_saving_to_total(dec("40"), "Jar").unwrap();
    assert_eq!(entry.description, "Jar");
    assert_eq!(total, dec("140"));
    let b = ledger.balances().unwrap();
    assert_eq!(b.cash_balance, dec("100"));
    assert_eq!(b.total_balance, dec("140"));
}

#[test]
fn unreadable_history_is_replaced_on_next_write() {
    let store = MemoryStore::new();
    store
        .set(keys::TRANSACTIONS, &serde_json::json!({"not": "a list"}))
        .unwrap();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());
    let ledger = Ledger::new(&store, clock);
    let storage = ledger.storage();
    assert!(storage.unreadable::<Vec<Transaction>>(keys::TRANSACTIONS).unwrap());
    assert!(!storage.unreadable::<Vec<Transaction>>(keys::SAVINGS).unwrap());

    ledger.add_income(dec("10"), "work", "").unwrap();
    assert!(!storage.unreadable::<Vec<Transaction>>(keys::TRANSACTIONS).unwrap());
    assert_eq!(storage.transactions().unwrap().len(), 1);
}
