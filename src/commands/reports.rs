// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::LedgerError;
use crate::models::{CategoryAggregate, MonthlySummary, TransactionType};
use crate::utils::{fmt_date_time, id_for_owner, maybe_print_json, month_bounds, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Aggregate one owner's transactions over one calendar month.
///
/// Window is `[first day 00:00:00, last day 23:59:59]` in local calendar
/// time. Each metric is a single scoped read; amounts are folded as exact
/// decimals, and a month with no activity yields zeros and an empty
/// category list, never absent fields.
pub fn month_summary(
    conn: &Connection,
    owner_id: i64,
    year: i32,
    month: u32,
) -> Result<MonthlySummary, LedgerError> {
    let (start, end) = month_bounds(year, month)?;
    let start_s = fmt_date_time(&start);
    let end_s = fmt_date_time(&end);

    let total_income = sum_for_type(conn, owner_id, TransactionType::Income, &start_s, &end_s)?;
    let total_expense = sum_for_type(conn, owner_id, TransactionType::Expense, &start_s, &end_s)?;
    let balance = total_income - total_expense;

    let mut stmt = conn.prepare(
        "SELECT category, type, amount FROM transactions
         WHERE owner_id=?1 AND date_time BETWEEN ?2 AND ?3",
    )?;
    let rows = stmt.query_map(params![owner_id, start_s, end_s], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;

    let mut by_category: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        let (category, type_s, amount_s) = row?;
        let amount = amount_s
            .parse::<Decimal>()
            .map_err(|_| LedgerError::invalid(format!("invalid stored amount '{}'", amount_s)))?;
        let entry = by_category
            .entry(category)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if type_s == "income" {
            entry.0 += amount;
        } else {
            entry.1 += amount;
        }
    }

    debug!(owner_id, year, month, categories = by_category.len(), "computed monthly summary");

    Ok(MonthlySummary {
        year,
        month,
        total_income,
        total_expense,
        balance,
        by_category: by_category
            .into_iter()
            .map(|(category, (income, expense))| CategoryAggregate {
                category,
                income,
                expense,
            })
            .collect(),
    })
}

fn sum_for_type(
    conn: &Connection,
    owner_id: i64,
    r#type: TransactionType,
    start: &str,
    end: &str,
) -> Result<Decimal, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT amount FROM transactions
         WHERE owner_id=?1 AND type=?2 AND date_time BETWEEN ?3 AND ?4",
    )?;
    let rows = stmt.query_map(params![owner_id, r#type.as_str(), start, end], |r| {
        r.get::<_, String>(0)
    })?;
    let mut total = Decimal::ZERO;
    for row in rows {
        let amount_s = row?;
        total += amount_s
            .parse::<Decimal>()
            .map_err(|_| LedgerError::invalid(format!("invalid stored amount '{}'", amount_s)))?;
    }
    Ok(total)
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let year = *sub.get_one::<i32>("year").unwrap();
    let month = *sub.get_one::<u32>("month").unwrap();

    let summary = month_summary(conn, owner_id, year, month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        println!(
            "{:04}-{:02}  income {}  expense {}  balance {}",
            summary.year, summary.month, summary.total_income, summary.total_expense,
            summary.balance
        );
        let rows = summary
            .by_category
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.income.to_string(),
                    c.expense.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Income", "Expense"], rows));
    }
    Ok(())
}
