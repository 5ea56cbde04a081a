// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthwise::commands::reports;
use monthwise::db;
use monthwise::errors::LedgerError;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

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

fn tx(conn: &Connection, owner_id: i64, date_time: &str, ty: &str, category: &str, amount: &str) {
    conn.execute(
        "INSERT INTO transactions(date_time, type, category, description, amount, owner_id)
         VALUES (?1, ?2, ?3, 'seed', ?4, ?5)",
        params![date_time, ty, category, amount, owner_id],
    )
    .unwrap();
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn empty_month_is_all_zeros() {
    let conn = setup();
    let alice = owner(&conn, "alice");

    let s = reports::month_summary(&conn, alice, 2024, 6).unwrap();
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert!(s.by_category.is_empty());
}

#[test]
fn balance_is_income_minus_expense_with_category_breakdown() {
    let conn = setup();
    let alice = owner(&conn, "alice");

    tx(&conn, alice, "2024-03-01 09:00:00", "income", "salary", "2500");
    tx(&conn, alice, "2024-03-10 12:30:00", "expense", "food", "100.50");
    tx(&conn, alice, "2024-03-21 19:00:00", "expense", "food", "49.50");
    tx(&conn, alice, "2024-03-22 10:00:00", "income", "food", "10");

    let s = reports::month_summary(&conn, alice, 2024, 3).unwrap();
    assert_eq!(s.total_income, dec("2510"));
    assert_eq!(s.total_expense, dec("150.00"));
    assert_eq!(s.balance, s.total_income - s.total_expense);
    assert_eq!(s.balance, dec("2360.00"));

    assert_eq!(s.by_category.len(), 2);
    let food = s.by_category.iter().find(|c| c.category == "food").unwrap();
    assert_eq!(food.income, dec("10"));
    assert_eq!(food.expense, dec("150.00"));
    let salary = s
        .by_category
        .iter()
        .find(|c| c.category == "salary")
        .unwrap();
    assert_eq!(salary.income, dec("2500"));
    assert_eq!(salary.expense, Decimal::ZERO);
}

#[test]
fn window_covers_the_whole_month_inclusively() {
    let conn = setup();
    let alice = owner(&conn, "alice");

    tx(&conn, alice, "2024-02-29 23:59:59", "income", "misc", "1");
    tx(&conn, alice, "2024-03-01 00:00:00", "income", "misc", "10");
    tx(&conn, alice, "2024-03-31 23:59:59", "income", "misc", "100");
    tx(&conn, alice, "2024-04-01 00:00:00", "income", "misc", "1000");

    let s = reports::month_summary(&conn, alice, 2024, 3).unwrap();
    assert_eq!(s.total_income, dec("110"));
}

#[test]
fn rejects_invalid_month_number() {
    let conn = setup();
    let alice = owner(&conn, "alice");

    assert!(matches!(
        reports::month_summary(&conn, alice, 2024, 13),
        Err(LedgerError::InvalidArgument(_))
    ));
}

#[test]
fn summary_is_owner_scoped() {
    let conn = setup();
    let alice = owner(&conn, "alice");
    let bob = owner(&conn, "bob");

    tx(&conn, alice, "2024-03-05 10:00:00", "income", "salary", "100");
    tx(&conn, bob, "2024-03-05 10:00:00", "income", "salary", "999");

    let s = reports::month_summary(&conn, alice, 2024, 3).unwrap();
    assert_eq!(s.total_income, dec("100"));
    assert_eq!(s.by_category.len(), 1);
}
