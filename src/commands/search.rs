// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params_from_iter, Connection};

use crate::errors::LedgerError;
use crate::models::{SearchFilter, SearchRow, TransactionType};
use crate::utils::{
    day_end, day_start, fmt_date_time, id_for_owner, maybe_print_json, parse_date,
    parse_date_time, parse_decimal, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, m.get_one::<String>("owner").unwrap())?;
    let filter = SearchFilter {
        text: m.get_one::<String>("text").cloned(),
        r#type: m.get_one::<String>("type").cloned(),
        category: m.get_one::<String>("category").cloned(),
        from: m.get_one::<String>("from").cloned(),
        to: m.get_one::<String>("to").cloned(),
    };

    let data = search(conn, owner_id, &filter)?;
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.r#type.as_str().to_string(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.to_string(),
                    r.plan_id.map(|p| p.to_string()).unwrap_or_default(),
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

/// Multi-predicate transaction search. The owner scope is unconditional;
/// every other predicate is appended only when its argument is present and
/// non-blank, and they all compose with AND.
pub fn search(
    conn: &Connection,
    owner_id: i64,
    filter: &SearchFilter,
) -> Result<Vec<SearchRow>, LedgerError> {
    let mut sql = String::from(
        "SELECT id, description, type, category, amount, date_time, plan_id
         FROM transactions WHERE owner_id=?",
    );
    let mut params_vec: Vec<String> = vec![owner_id.to_string()];

    if let Some(text) = non_blank(&filter.text) {
        sql.push_str(" AND lower(description) LIKE ?");
        params_vec.push(format!("%{}%", text.to_lowercase()));
    }
    // An unknown type literal means "no type filter", not an error.
    if let Some(t) = filter.r#type.as_deref().and_then(TransactionType::parse) {
        sql.push_str(" AND type=?");
        params_vec.push(t.as_str().to_string());
    }
    if let Some(category) = non_blank(&filter.category) {
        sql.push_str(" AND lower(category) LIKE ?");
        params_vec.push(format!("%{}%", category.to_lowercase()));
    }
    if let Some(from) = non_blank(&filter.from) {
        sql.push_str(" AND date_time >= ?");
        params_vec.push(fmt_date_time(&day_start(parse_date(from)?)));
    }
    if let Some(to) = non_blank(&filter.to) {
        sql.push_str(" AND date_time <= ?");
        params_vec.push(fmt_date_time(&day_end(parse_date(to)?)));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(params_vec.iter()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let type_s: String = r.get(2)?;
        let amount_s: String = r.get(4)?;
        let dt_s: String = r.get(5)?;
        let plan_id: Option<i64> = r.get(6)?;
        out.push(SearchRow {
            id: r.get(0)?,
            description: r.get(1)?,
            r#type: TransactionType::parse(&type_s)
                .ok_or_else(|| LedgerError::invalid(format!("unknown stored type '{}'", type_s)))?,
            category: r.get(3)?,
            amount: parse_decimal(&amount_s)?,
            date: parse_date_time(&dt_s)?.date(),
            installment: plan_id.is_some(),
            plan_id,
        });
    }
    Ok(out)
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
