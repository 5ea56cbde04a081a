// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, Months};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::LedgerError;
use crate::models::{CreatePlanRequest, InstallmentEntry, InstallmentPlanDto};
use crate::utils::{
    day_start, extract_installment_number, fmt_date_time, id_for_owner, maybe_print_json,
    parse_date, parse_date_time, parse_decimal, pretty_table,
};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Create an installment plan and generate its monthly expense transactions.
///
/// The plan header and all of its transactions are written inside a single
/// SQLite transaction, so a concurrent reader either sees the complete
/// schedule or nothing at all. Validation happens before any write.
///
/// Installment `i` is dated `start_date + (i-1)` calendar months at
/// midnight; the day of month is clamped when the target month is shorter
/// (Jan 31 -> Feb 29 on leap years).
pub fn create_plan(
    conn: &mut Connection,
    owner_id: i64,
    req: &CreatePlanRequest,
) -> Result<InstallmentPlanDto, LedgerError> {
    if req.total_installments <= 0 {
        return Err(LedgerError::invalid(
            "the number of installments must be greater than zero",
        ));
    }
    if req.installment_value <= Decimal::ZERO {
        return Err(LedgerError::invalid(
            "the installment value must be greater than zero",
        ));
    }

    let total_amount = req.installment_value * Decimal::from(req.total_installments);
    let start_date = req.start_date.unwrap_or_else(|| Local::now().date_naive());

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO installment_plans(total_installments, total_amount, installment_value, owner_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            req.total_installments,
            total_amount.to_string(),
            req.installment_value.to_string(),
            owner_id
        ],
    )?;
    let plan_id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(date_time, type, category, description, amount, owner_id, plan_id, installment_number)
             VALUES (?1, 'expense', ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for i in 1..=req.total_installments {
            let offset = u32::try_from(i - 1)
                .map_err(|_| LedgerError::invalid("too many installments"))?;
            let due = start_date
                .checked_add_months(Months::new(offset))
                .ok_or_else(|| LedgerError::invalid("installment date out of range"))?;
            let description = format!(
                "{} (Installment {}/{})",
                req.description, i, req.total_installments
            );
            stmt.execute(params![
                fmt_date_time(&day_start(due)),
                req.category,
                description,
                req.installment_value.to_string(),
                owner_id,
                plan_id,
                i,
            ])?;
        }
    }
    tx.commit()?;
    debug!(plan_id, installments = req.total_installments, "created installment plan");

    load_plan_dto(conn, plan_id)
}

/// All plans for one owner, most recently created first.
pub fn list_plans(conn: &Connection, owner_id: i64) -> Result<Vec<InstallmentPlanDto>, LedgerError> {
    let mut stmt =
        conn.prepare("SELECT id FROM installment_plans WHERE owner_id=?1 ORDER BY id DESC")?;
    let ids = stmt
        .query_map(params![owner_id], |r| r.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    ids.into_iter().map(|id| load_plan_dto(conn, id)).collect()
}

pub fn get_plan(
    conn: &Connection,
    owner_id: i64,
    id: i64,
) -> Result<InstallmentPlanDto, LedgerError> {
    check_plan_owner(conn, owner_id, id)?;
    load_plan_dto(conn, id)
}

/// Delete a plan and every transaction it generated, atomically. Either the
/// whole cascade commits or the pre-call state is left untouched.
pub fn delete_plan(conn: &mut Connection, owner_id: i64, id: i64) -> Result<(), LedgerError> {
    check_plan_owner(conn, owner_id, id)?;

    let tx = conn.transaction()?;
    // Children first: the schema has no declarative cascade on plan_id.
    tx.execute("DELETE FROM transactions WHERE plan_id=?1", params![id])?;
    tx.execute("DELETE FROM installment_plans WHERE id=?1", params![id])?;
    tx.commit()?;
    debug!(plan_id = id, "deleted installment plan");
    Ok(())
}

fn check_plan_owner(conn: &Connection, owner_id: i64, id: i64) -> Result<(), LedgerError> {
    let plan_owner: Option<i64> = conn
        .query_row(
            "SELECT owner_id FROM installment_plans WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    match plan_owner {
        None => Err(LedgerError::NotFound("installment plan")),
        Some(o) if o != owner_id => Err(LedgerError::AccessDenied),
        Some(_) => Ok(()),
    }
}

fn load_plan_dto(conn: &Connection, plan_id: i64) -> Result<InstallmentPlanDto, LedgerError> {
    let header = conn
        .query_row(
            "SELECT id, total_installments, total_amount, installment_value
             FROM installment_plans WHERE id=?1",
            params![plan_id],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?
        .ok_or(LedgerError::NotFound("installment plan"))?;

    let mut stmt = conn.prepare(
        "SELECT id, description, amount, category, date_time
         FROM transactions WHERE plan_id=?1 ORDER BY installment_number, id",
    )?;
    let rows = stmt.query_map(params![plan_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;

    let mut transactions = Vec::new();
    for row in rows {
        let (id, description, amount_s, category, dt_s) = row?;
        transactions.push(InstallmentEntry {
            id,
            // The display number is re-parsed from the description text, as
            // the original tracker did; the stored column is kept in sync at
            // write time.
            installment_number: extract_installment_number(&description),
            amount: parse_decimal(&amount_s)?,
            date: parse_date_time(&dt_s)?.date(),
            description,
            category,
        });
    }

    Ok(InstallmentPlanDto {
        id: header.0,
        total_installments: header.1,
        total_amount: parse_decimal(&header.2)?,
        installment_value: parse_decimal(&header.3)?,
        transactions,
    })
}

fn create(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let req = CreatePlanRequest {
        total_installments: *sub.get_one::<i64>("installments").unwrap(),
        installment_value: parse_decimal(sub.get_one::<String>("value").unwrap())?,
        category: sub.get_one::<String>("category").unwrap().clone(),
        description: sub.get_one::<String>("description").unwrap().clone(),
        start_date: sub
            .get_one::<String>("start")
            .map(|s| parse_date(s))
            .transpose()?,
    };

    let plan = create_plan(conn, owner_id, &req)?;
    if !maybe_print_json(sub.get_flag("json"), false, &plan)? {
        println!(
            "Created plan {}: {} x {} = {}",
            plan.id, plan.total_installments, plan.installment_value, plan.total_amount
        );
        println!("{}", installments_table(&plan));
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let plans = list_plans(conn, owner_id)?;
    if !maybe_print_json(sub.get_flag("json"), false, &plans)? {
        let rows = plans
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.total_installments.to_string(),
                    p.installment_value.to_string(),
                    p.total_amount.to_string(),
                    p.transactions
                        .first()
                        .map(|t| t.description.clone())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Installments", "Value", "Total", "First installment"],
                rows
            )
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    match get_plan(conn, owner_id, id) {
        Ok(plan) => {
            if !maybe_print_json(sub.get_flag("json"), false, &plan)? {
                println!(
                    "Plan {}: {} x {} = {}",
                    plan.id, plan.total_installments, plan.installment_value, plan.total_amount
                );
                println!("{}", installments_table(&plan));
            }
        }
        // Ownership mismatches read the same as missing plans so ids cannot
        // be probed across owners.
        Err(e) if e.is_not_found_like() => println!("Plan {} not found", id),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_owner(conn, sub.get_one::<String>("owner").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    match delete_plan(conn, owner_id, id) {
        Ok(()) => println!("Removed plan {} and its installments", id),
        Err(e) if e.is_not_found_like() => println!("Plan {} not found", id),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn installments_table(plan: &InstallmentPlanDto) -> comfy_table::Table {
    let rows = plan
        .transactions
        .iter()
        .map(|t| {
            vec![
                format!("{}/{}", t.installment_number, plan.total_installments),
                t.date.to_string(),
                t.category.clone(),
                t.description.clone(),
                t.amount.to_string(),
            ]
        })
        .collect();
    pretty_table(&["#", "Date", "Category", "Description", "Amount"], rows)
}
