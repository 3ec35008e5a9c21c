// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hamsterbook::db;
use hamsterbook::error::ValidationError;
use hamsterbook::models::{
    FixedExpenseInput, LoanInput, SavingInput, SavingKind, TransactionInput, TransactionType,
};
use hamsterbook::store::{Collection, FinancialKind, LedgerStore};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tempfile::tempdir;

fn mem_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn lunch() -> TransactionInput {
    TransactionInput {
        date: d(2024, 3, 5),
        r#type: TransactionType::Expense,
        category: "식비".into(),
        amount: Decimal::from(15000),
        description: "점심".into(),
    }
}

#[test]
fn empty_database_loads_empty_state() {
    let store = LedgerStore::load(mem_conn()).unwrap();
    assert!(store.transactions().is_empty());
    assert!(store.fixed_expenses().is_empty());
    assert!(store.savings().is_empty());
    assert!(store.loans().is_empty());
}

#[test]
fn collections_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");

    let before = {
        let conn = Connection::open(&path).unwrap();
        db::init_schema(&conn).unwrap();
        let mut store = LedgerStore::load(conn).unwrap();
        store.add_transaction(lunch()).unwrap();
        store
            .add_fixed_expense(FixedExpenseInput {
                name: "월세".into(),
                amount: Decimal::from(500_000),
                day: 25,
            })
            .unwrap();
        store
            .add_saving(SavingInput {
                name: "청년희망적금".into(),
                kind: SavingKind::Installment,
                monthly_amount: Decimal::from(100_000),
                rate: Decimal::new(35, 1),
                term: 24,
                start_date: d(2024, 1, 2),
            })
            .unwrap();
        store
            .add_loan(LoanInput {
                name: "전세자금대출".into(),
                principal: Decimal::from(30_000_000),
                rate: Decimal::new(42, 1),
                term: 36,
                start_date: d(2024, 2, 1),
            })
            .unwrap();
        store.state().clone()
    };

    let conn = Connection::open(&path).unwrap();
    db::init_schema(&conn).unwrap();
    let after = LedgerStore::load(conn).unwrap();
    assert_eq!(after.state(), &before);
}

#[test]
fn corrupt_slot_only_empties_its_own_collection() {
    let conn = mem_conn();
    db::write_slot(&conn, Collection::Transactions.key(), "{not json").unwrap();
    db::write_slot(
        &conn,
        Collection::FixedExpenses.key(),
        r#"[{"id":"abc1234","name":"통신비","amount":55000,"day":10}]"#,
    )
    .unwrap();

    let store = LedgerStore::load(conn).unwrap();
    assert!(store.transactions().is_empty());
    assert_eq!(store.fixed_expenses().len(), 1);
    assert_eq!(store.fixed_expenses()[0].amount, Decimal::from(55000));
}

#[test]
fn loads_blobs_written_by_the_browser_app() {
    let conn = mem_conn();
    db::write_slot(
        &conn,
        Collection::Transactions.key(),
        r#"[{"id":"k3j9x0a","date":"2024-03-05","type":"EXPENSE","category":"식비","amount":15000,"description":"점심"}]"#,
    )
    .unwrap();
    db::write_slot(
        &conn,
        Collection::Savings.key(),
        r#"[{"id":"1718000000000","name":"정기예금","type":"DEPOSIT","monthlyAmount":1000000,"rate":4,"term":12,"startDate":"2024-06-10"}]"#,
    )
    .unwrap();

    let store = LedgerStore::load(conn).unwrap();
    let tx = &store.transactions()[0];
    assert_eq!(tx.id, "k3j9x0a");
    assert_eq!(tx.date, d(2024, 3, 5));
    assert_eq!(tx.r#type, TransactionType::Expense);
    let s = &store.savings()[0];
    assert_eq!(s.kind, SavingKind::Deposit);
    assert_eq!(s.monthly_amount, Decimal::from(1_000_000));
    assert_eq!(s.start_date, d(2024, 6, 10));
}

#[test]
fn add_transaction_assigns_unique_ids_and_persists() {
    let conn = mem_conn();
    let mut store = LedgerStore::load(conn).unwrap();
    let mut ids = HashSet::new();
    for _ in 0..50 {
        let tx = store.add_transaction(lunch()).unwrap();
        assert!(ids.insert(tx.id));
    }
    let raw = db::read_slot(store.conn(), Collection::Transactions.key())
        .unwrap()
        .unwrap();
    let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 50);
    assert_eq!(stored[0]["type"], "EXPENSE");
    assert_eq!(stored[0]["date"], "2024-03-05");
}

#[test]
fn invalid_records_are_refused_without_writing() {
    let mut store = LedgerStore::load(mem_conn()).unwrap();

    let mut blank = lunch();
    blank.category = "   ".into();
    let err = store.add_transaction(blank).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::EmptyCategory)
    );

    let mut negative = lunch();
    negative.amount = Decimal::from(-1);
    assert!(store.add_transaction(negative).is_err());

    let err = store
        .add_fixed_expense(FixedExpenseInput {
            name: "관리비".into(),
            amount: Decimal::from(100_000),
            day: 32,
        })
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::DayOutOfRange(32))
    );

    assert!(store.transactions().is_empty());
    assert!(store.fixed_expenses().is_empty());
    assert!(
        db::read_slot(store.conn(), Collection::Transactions.key())
            .unwrap()
            .is_none()
    );
}

#[test]
fn zero_amount_is_storable_but_not_manually_enterable() {
    let mut input = lunch();
    input.amount = Decimal::ZERO;
    assert_eq!(
        input.validate_manual(),
        Err(ValidationError::NonPositiveAmount)
    );
    let mut store = LedgerStore::load(mem_conn()).unwrap();
    assert!(store.add_transaction(input).is_ok());
}

#[test]
fn delete_financial_item_by_id() {
    let mut store = LedgerStore::load(mem_conn()).unwrap();
    let keep = store
        .add_fixed_expense(FixedExpenseInput {
            name: "보험".into(),
            amount: Decimal::from(80_000),
            day: 1,
        })
        .unwrap();
    let gone = store
        .add_fixed_expense(FixedExpenseInput {
            name: "헬스장".into(),
            amount: Decimal::from(60_000),
            day: 15,
        })
        .unwrap();

    assert!(!store
        .delete_financial_item(FinancialKind::FixedExpense, "missing")
        .unwrap());
    assert_eq!(store.fixed_expenses().len(), 2);

    assert!(store
        .delete_financial_item(FinancialKind::FixedExpense, &gone.id)
        .unwrap());
    assert_eq!(store.fixed_expenses(), &[keep.clone()]);

    let raw = db::read_slot(store.conn(), Collection::FixedExpenses.key())
        .unwrap()
        .unwrap();
    assert!(raw.contains(&keep.id));
    assert!(!raw.contains(&gone.id));
}

#[test]
fn loan_with_zero_term_is_rejected() {
    let mut store = LedgerStore::load(mem_conn()).unwrap();
    let err = store
        .add_loan(LoanInput {
            name: "마이너스통장".into(),
            principal: Decimal::from(1_000_000),
            rate: Decimal::from(5),
            term: 0,
            start_date: d(2024, 1, 1),
        })
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::ZeroTerm)
    );
}

#[test]
fn failed_write_rolls_back_memory() {
    let mut store = LedgerStore::load(mem_conn()).unwrap();
    store.add_transaction(lunch()).unwrap();
    store.conn().execute_batch("DROP TABLE slots").unwrap();

    assert!(store.add_transaction(lunch()).is_err());
    assert_eq!(store.transactions().len(), 1);
}
