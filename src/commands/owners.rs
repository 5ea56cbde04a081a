// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("INSERT INTO owners(name) VALUES (?1)", params![name])?;
            println!("Added owner '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare("SELECT id, name, created_at FROM owners ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (id, name, created) = row?;
                data.push(vec![id.to_string(), name, created]);
            }
            println!("{}", pretty_table(&["ID", "Name", "Created"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM owners WHERE name=?1", params![name])?;
            println!("Removed owner '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
