// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::db;
use crate::engine::aggregate;
use crate::engine::fiscal::FinancialMonth;
use crate::models::Expense;
use crate::utils::{
    current_owner, get_month_start_day, maybe_print_json, parse_financial_month, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("by-category", sub)) => grouped(conn, sub, Grouping::Category)?,
        Some(("by-source", sub)) => grouped(conn, sub, Grouping::Source)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

enum Grouping {
    Category,
    Source,
}

fn month_view(
    conn: &Connection,
    sub: &clap::ArgMatches,
) -> Result<(FinancialMonth, Vec<Expense>, String)> {
    let owner = current_owner(conn)?;
    let start_day = get_month_start_day(conn)?;
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_financial_month(s)?,
        None => FinancialMonth::current(Utc::now().date_naive(), start_day),
    };
    let ledger = db::list_expenses(conn, &owner)?;
    let view = aggregate::filter_by_financial_month(&ledger, month, start_day);
    Ok((month, view, owner))
}

fn grouped(conn: &Connection, sub: &clap::ArgMatches, grouping: Grouping) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (month, view, owner) = month_view(conn, sub)?;

    let (groups, names, label) = match grouping {
        Grouping::Category => (
            aggregate::group_by_category(&view),
            db::category_names(conn, &owner)?,
            "Category",
        ),
        Grouping::Source => (
            aggregate::group_by_source(&view),
            db::source_names(conn, &owner)?,
            "Source",
        ),
    };
    let total = aggregate::total_amount(&view);

    let mut items: Vec<(String, Decimal)> = groups
        .into_iter()
        .map(|(id, amt)| (resolve(&names, &id), amt))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));

    let mut data = Vec::new();
    for (name, amt) in items {
        data.push(vec![name, format!("{:.2}", amt), share_of(amt, total)]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("Financial month {}", month);
        println!("{}", pretty_table(&[label, "Spent", "Share %"], data));
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (month, view, _) = month_view(conn, sub)?;
    let total = aggregate::total_amount(&view);
    let data = vec![vec![
        month.to_string(),
        view.len().to_string(),
        format!("{:.2}", total),
    ]];
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Entries", "Total"], data));
    }
    Ok(())
}

fn resolve(names: &HashMap<String, String>, id: &str) -> String {
    names
        .get(id)
        .cloned()
        .unwrap_or_else(|| "(undefined)".into())
}

fn share_of(amount: Decimal, total: Decimal) -> String {
    if total.is_zero() {
        return "0.0".into();
    }
    format!("{:.1}", amount / total * Decimal::from(100))
}
