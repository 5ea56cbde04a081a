// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.monthwise", "Monthwise", "monthwise"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("monthwise.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Create the schema if it is not there yet. Public so tests can run against
/// in-memory connections.
///
/// Amounts are stored as TEXT decimals and summed in Rust, never as floats.
/// `transactions.plan_id` deliberately has no ON DELETE action: removing a
/// plan must delete its transactions explicitly inside one transaction (see
/// `commands::plans::delete_plan`).
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS owners(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS installment_plans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        total_installments INTEGER NOT NULL,
        total_amount TEXT NOT NULL,
        installment_value TEXT NOT NULL,
        owner_id INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date_time TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        owner_id INTEGER NOT NULL,
        plan_id INTEGER,
        installment_number INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE,
        FOREIGN KEY(plan_id) REFERENCES installment_plans(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date_time ON transactions(date_time);
    CREATE INDEX IF NOT EXISTS idx_transactions_owner ON transactions(owner_id);
    CREATE INDEX IF NOT EXISTS idx_transactions_plan ON transactions(plan_id);
    "#,
    )?;
    Ok(())
}
