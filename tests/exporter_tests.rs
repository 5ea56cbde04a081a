// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthwise::{cli, commands::exporter, db};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for name in ["alice", "bob"] {
        conn.execute("INSERT INTO owners(name) VALUES (?1)", params![name])
            .unwrap();
    }
    conn.execute(
        "INSERT INTO transactions(date_time, type, category, description, amount, owner_id)
         VALUES ('2024-01-05 08:00:00', 'income', 'salary', 'Pay', '2500', 1),
                ('2024-01-10 12:00:00', 'expense', 'food', 'Lunch', '15.50', 1),
                ('2024-01-10 12:00:00', 'expense', 'food', 'Bob lunch', '9', 2)",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn csv_export_is_owner_scoped() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let out_s = out.to_str().unwrap().to_string();

    let matches = cli::build_cli().get_matches_from([
        "monthwise",
        "export",
        "transactions",
        "--owner",
        "alice",
        "--format",
        "csv",
        "--out",
        &out_s,
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(&conn, sub).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3); // header + alice's two rows
    assert!(lines[0].starts_with("date_time,type,category"));
    assert!(content.contains("Pay"));
    assert!(content.contains("Lunch"));
    assert!(!content.contains("Bob lunch"));
}
