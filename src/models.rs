// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Case-insensitive parse of "income"/"expense"; anything else is `None`.
    /// The search filter relies on that to ignore unknown type literals.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("income") {
            Some(TransactionType::Income)
        } else if s.eq_ignore_ascii_case("expense") {
            Some(TransactionType::Expense)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date_time: NaiveDateTime,
    pub r#type: TransactionType,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub owner_id: i64,
    pub plan_id: Option<i64>,
    pub installment_number: Option<i64>,
}

/// Insert shape for a directly recorded transaction. A missing `date_time`
/// means "now".
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date_time: Option<NaiveDateTime>,
    pub r#type: TransactionType,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct CreatePlanRequest {
    pub total_installments: i64,
    pub installment_value: Decimal,
    pub category: String,
    pub description: String,
    /// Date of the first installment; defaults to today.
    pub start_date: Option<NaiveDate>,
}

/// Plan projection returned to callers: header fields plus the ordered
/// installment schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentPlanDto {
    pub id: i64,
    pub total_installments: i64,
    pub total_amount: Decimal,
    pub installment_value: Decimal,
    pub transactions: Vec<InstallmentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentEntry {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    /// Display number 1..N, re-parsed from the description text; 0 when the
    /// suffix pattern is absent.
    pub installment_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub by_category: Vec<CategoryAggregate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Optional predicates for the transaction search; all compose with AND on
/// top of the mandatory owner scope. Blank strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub text: Option<String>,
    pub r#type: Option<String>,
    pub category: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Compact search result row; `installment` is derived from the plan link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRow {
    pub id: i64,
    pub description: String,
    pub r#type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub plan_id: Option<i64>,
    pub installment: bool,
}
