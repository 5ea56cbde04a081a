// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthwise::commands::transactions;
use monthwise::db;
use monthwise::errors::LedgerError;
use monthwise::models::{NewTransaction, TransactionType};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn owner(conn: &Connection, name: &str) -> i64 {
    conn.execute("INSERT INTO owners(name) VALUES (?1)", params![name])
        .unwrap();
    conn.last_insert_rowid()
}

fn new_tx(description: &str, amount: &str) -> NewTransaction {
    NewTransaction {
        date_time: None,
        r#type: TransactionType::Expense,
        category: "misc".into(),
        description: description.into(),
        amount: amount.parse().unwrap(),
    }
}

#[test]
fn add_defaults_timestamp_to_now() {
    let conn = setup();
    let alice = owner(&conn, "alice");

    let tx = transactions::add_transaction(&conn, alice, &new_tx("Coffee", "4.50")).unwrap();
    assert_eq!(tx.date_time.date(), chrono::Local::now().date_naive());
    assert_eq!(tx.plan_id, None);
    assert_eq!(tx.installment_number, None);

    // Round-trips through the store unchanged.
    let listed = transactions::list_transactions(&conn, alice, None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].date_time, tx.date_time);
    assert_eq!(listed[0].amount, tx.amount);
}

#[test]
fn list_is_newest_first_and_respects_limit() {
    let conn = setup();
    let alice = owner(&conn, "alice");

    for (i, date) in ["2025-01-01", "2025-01-02", "2025-01-03"].iter().enumerate() {
        let mut tx = new_tx(&format!("t{}", i), "10");
        tx.date_time = Some(
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_time(chrono::NaiveTime::MIN),
        );
        transactions::add_transaction(&conn, alice, &tx).unwrap();
    }

    let rows = transactions::list_transactions(&conn, alice, Some(2)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date_time.date().to_string(), "2025-01-03");
    assert_eq!(rows[1].date_time.date().to_string(), "2025-01-02");
}

#[test]
fn delete_enforces_ownership() {
    let conn = setup();
    let alice = owner(&conn, "alice");
    let bob = owner(&conn, "bob");

    let tx = transactions::add_transaction(&conn, alice, &new_tx("Lunch", "12")).unwrap();

    assert!(matches!(
        transactions::delete_transaction(&conn, bob, tx.id),
        Err(LedgerError::AccessDenied)
    ));
    assert!(matches!(
        transactions::delete_transaction(&conn, alice, tx.id + 999),
        Err(LedgerError::NotFound(_))
    ));

    transactions::delete_transaction(&conn, alice, tx.id).unwrap();
    assert!(transactions::list_transactions(&conn, alice, None)
        .unwrap()
        .is_empty());
}
