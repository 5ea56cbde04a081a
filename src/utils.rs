// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::errors::LedgerError;

/// Storage format for `transactions.date_time`. Second resolution and fixed
/// width, so lexicographic TEXT comparison matches chronological order.
pub const DATE_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

static INSTALLMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(Installment (\d+)/\d+\)").expect("installment pattern compiles"));

pub fn parse_date(s: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| LedgerError::invalid(format!("invalid date '{}', expected YYYY-MM-DD", s)))
}

pub fn parse_decimal(s: &str) -> Result<Decimal, LedgerError> {
    s.parse::<Decimal>()
        .map_err(|_| LedgerError::invalid(format!("invalid decimal '{}'", s)))
}

pub fn fmt_date_time(dt: &NaiveDateTime) -> String {
    dt.format(DATE_TIME_FMT).to_string()
}

pub fn parse_date_time(s: &str) -> Result<NaiveDateTime, LedgerError> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FMT)
        .map_err(|_| LedgerError::invalid(format!("invalid stored timestamp '{}'", s)))
}

/// Current local date-time at the second resolution the store uses.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid wall-clock time"))
}

/// Inclusive aggregation window for one calendar month:
/// `[first day 00:00:00, last day 23:59:59]`.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime), LedgerError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::invalid(format!("invalid month {}-{}", year, month)))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| LedgerError::invalid(format!("invalid month {}-{}", year, month)))?;
    Ok((day_start(first), day_end(last)))
}

/// Pull the display installment number out of a generated description such
/// as "TV (Installment 2/12)". Returns 0 when the pattern is absent, which
/// mirrors the behavior the plan projection has always had.
pub fn extract_installment_number(description: &str) -> i64 {
    INSTALLMENT_RE
        .captures(description)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

pub fn id_for_owner(conn: &Connection, name: &str) -> Result<i64, LedgerError> {
    conn.query_row("SELECT id FROM owners WHERE name=?1", params![name], |r| {
        r.get(0)
    })
    .optional()?
    .ok_or(LedgerError::NotFound("owner"))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
