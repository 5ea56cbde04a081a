// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthwise::commands::{plans, search};
use monthwise::db;
use monthwise::errors::LedgerError;
use monthwise::models::{CreatePlanRequest, SearchFilter, TransactionType};
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

fn tx(
    conn: &Connection,
    owner_id: i64,
    date_time: &str,
    ty: &str,
    category: &str,
    description: &str,
    amount: &str,
) {
    conn.execute(
        "INSERT INTO transactions(date_time, type, category, description, amount, owner_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![date_time, ty, category, description, amount, owner_id],
    )
    .unwrap();
}

fn seed(conn: &Connection) -> (i64, i64) {
    let alice = owner(conn, "alice");
    let bob = owner(conn, "bob");
    tx(conn, alice, "2024-01-05 08:00:00", "income", "salary", "Monthly salary", "2500");
    tx(conn, alice, "2024-01-10 12:00:00", "expense", "food", "Grocery run", "50.00");
    tx(conn, alice, "2024-02-01 19:30:00", "expense", "food", "Food delivery", "30");
    tx(conn, bob, "2024-01-10 12:00:00", "expense", "food", "Groceries", "75");
    (alice, bob)
}

#[test]
fn owner_scope_always_applies() {
    let conn = setup();
    let (alice, bob) = seed(&conn);

    let all = search::search(&conn, alice, &SearchFilter::default()).unwrap();
    assert_eq!(all.len(), 3);

    let filter = SearchFilter {
        category: Some("food".into()),
        ..Default::default()
    };
    let bobs = search::search(&conn, bob, &filter).unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].description, "Groceries");
}

#[test]
fn text_and_type_compose_conjunctively() {
    let conn = setup();
    let (alice, _) = seed(&conn);

    let filter = SearchFilter {
        text: Some("gro".into()),
        r#type: Some("EXPENSE".into()),
        ..Default::default()
    };
    let rows = search::search(&conn, alice, &filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Grocery run");
    assert_eq!(rows[0].r#type, TransactionType::Expense);
}

#[test]
fn unknown_type_literal_is_ignored() {
    let conn = setup();
    let (alice, _) = seed(&conn);

    let with_unknown = SearchFilter {
        r#type: Some("transfer".into()),
        ..Default::default()
    };
    let without = SearchFilter::default();
    assert_eq!(
        search::search(&conn, alice, &with_unknown).unwrap().len(),
        search::search(&conn, alice, &without).unwrap().len()
    );
}

#[test]
fn blank_predicates_are_absent() {
    let conn = setup();
    let (alice, _) = seed(&conn);

    let filter = SearchFilter {
        text: Some("   ".into()),
        category: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(search::search(&conn, alice, &filter).unwrap().len(), 3);
}

#[test]
fn category_match_is_case_insensitive_substring() {
    let conn = setup();
    let (alice, _) = seed(&conn);

    let filter = SearchFilter {
        category: Some("FOO".into()),
        ..Default::default()
    };
    let rows = search::search(&conn, alice, &filter).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn date_range_bounds_are_inclusive() {
    let conn = setup();
    let (alice, _) = seed(&conn);

    let filter = SearchFilter {
        from: Some("2024-01-05".into()),
        to: Some("2024-01-10".into()),
        ..Default::default()
    };
    assert_eq!(search::search(&conn, alice, &filter).unwrap().len(), 2);

    let narrower = SearchFilter {
        from: Some("2024-01-05".into()),
        to: Some("2024-01-09".into()),
        ..Default::default()
    };
    assert_eq!(search::search(&conn, alice, &narrower).unwrap().len(), 1);
}

#[test]
fn malformed_date_literal_is_rejected() {
    let conn = setup();
    let (alice, _) = seed(&conn);

    let filter = SearchFilter {
        from: Some("01-05-2024".into()),
        ..Default::default()
    };
    assert!(matches!(
        search::search(&conn, alice, &filter),
        Err(LedgerError::InvalidArgument(_))
    ));
}

#[test]
fn installment_flag_is_derived_from_plan_link() {
    let mut conn = setup();
    let (alice, _) = seed(&conn);

    let req = CreatePlanRequest {
        total_installments: 2,
        installment_value: "60".parse().unwrap(),
        category: "subscriptions".into(),
        description: "Streaming".into(),
        start_date: Some("2024-01-02".parse().unwrap()),
    };
    let plan = plans::create_plan(&mut conn, alice, &req).unwrap();

    let filter = SearchFilter {
        category: Some("subscriptions".into()),
        ..Default::default()
    };
    let rows = search::search(&conn, alice, &filter).unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!(row.installment);
        assert_eq!(row.plan_id, Some(plan.id));
    }

    let plain = SearchFilter {
        category: Some("food".into()),
        ..Default::default()
    };
    for row in search::search(&conn, alice, &plain).unwrap() {
        assert!(!row.installment);
        assert_eq!(row.plan_id, None);
    }
}
