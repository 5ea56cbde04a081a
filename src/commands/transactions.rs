// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::errors::LedgerError;
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::utils::{
    day_start, fmt_date_time, id_for_owner, maybe_print_json, now_local, parse_date,
    parse_date_time, parse_decimal, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Record a single transaction for an owner. The timestamp defaults to the
/// creation instant when unset.
pub fn add_transaction(
    conn: &Connection,
    owner_id: i64,
    new: &NewTransaction,
) -> Result<Transaction, LedgerError> {
    let date_time = new.date_time.unwrap_or_else(now_local);
    conn.execute(
        "INSERT INTO transactions(date_time, type, category, description, amount, owner_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            fmt_date_time(&date_time),
            new.r#type.as_str(),
            new.category,
            new.description,
            new.amount.to_string(),
            owner_id
        ],
    )?;
    Ok(Transaction {
        id: conn.last_insert_rowid(),
        date_time,
        r#type: new.r#type,
        category: new.category.clone(),
        description: new.description.clone(),
        amount: new.amount,
        owner_id,
        plan_id: None,
        installment_number: None,
    })
}

/// One owner's transactions, newest first.
pub fn list_transactions(
    conn: &Connection,
    owner_id: i64,
    limit: Option<usize>,
) -> Result<Vec<Transaction>, LedgerError> {
    let mut sql = String::from(
        "SELECT id, date_time, type, category, description, amount, owner_id, plan_id, installment_number
         FROM transactions WHERE owner_id=? ORDER BY date_time DESC, id DESC",
    );
    let mut params_vec: Vec<String> = vec![owner_id.to_string()];
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(params_vec.iter()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let type_s: String = r.get(2)?;
        let amount_s: String = r.get(5)?;
        let dt_s: String = r.get(1)?;
        out.push(Transaction {
            id: r.get(0)?,
            date_time: parse_date_time(&dt_s)?,
            r#type: TransactionType::parse(&type_s)
                .ok_or_else(|| LedgerError::invalid(format!("unknown stored type '{}'", type_s)))?,
            category: r.get(3)?,
            description: r.get(4)?,
            amount: parse_decimal(&amount_s)?,
            owner_id: r.get(6)?,
            plan_id: r.get(7)?,
            installment_number: r.get(8)?,
        });
    }
    Ok(out)
}

/// Delete one transaction after checking it belongs to the caller.
pub fn delete_transaction(conn: &Connection, owner_id: i64, id: i64) -> Result<(), LedgerError> {
    let tx_owner: Option<i64> = conn
        .query_row(
            "SELECT owner_id FROM transactions WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    match tx_owner {
        None => Err(LedgerError::NotFound("transaction")),
        Some(o) if o != owner_id => Err(LedgerError::AccessDenied),
        Some(_) => {
            conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
            Ok(())
        }
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let type_s = sub.get_one::<String>("type").unwrap();
    let r#type = TransactionType::parse(type_s).ok_or_else(|| {
        LedgerError::invalid(format!(
            "unknown transaction type '{}', expected income or expense",
            type_s
        ))
    })?;
    let new = NewTransaction {
        date_time: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?
            .map(day_start),
        r#type,
        category: sub.get_one::<String>("category").unwrap().clone(),
        description: sub.get_one::<String>("description").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
    };
    let tx = add_transaction(conn, owner_id, &new)?;
    println!(
        "Recorded {} {} '{}' on {}",
        tx.r#type.as_str(),
        tx.amount,
        tx.description,
        tx.date_time.date()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let limit = sub.get_one::<usize>("limit").copied();
    let data = list_transactions(conn, owner_id, limit)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date_time.date().to_string(),
                    t.r#type.as_str().to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.plan_id.map(|p| p.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount", "Plan"],
                rows
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    match delete_transaction(conn, owner_id, id) {
        Ok(()) => println!("Removed transaction {}", id),
        Err(e) if e.is_not_found_like() => println!("Transaction {} not found", id),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
