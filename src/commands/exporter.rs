// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde_json::json;

use crate::db;
use crate::engine::aggregate;
use crate::engine::fiscal::FinancialMonth;
use crate::utils::{current_owner, get_month_start_day, parse_financial_month};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

/// Exports exactly what the list and report views show: the same engine
/// filter over the same ledger, so exported totals match displayed totals.
fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let owner = current_owner(conn)?;
    let start_day = get_month_start_day(conn)?;
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_financial_month(s)?,
        None => FinancialMonth::current(Utc::now().date_naive(), start_day),
    };

    let ledger = db::list_expenses(conn, &owner)?;
    let view = aggregate::sort_by_date_desc(&aggregate::filter_by_financial_month(
        &ledger, month, start_day,
    ));
    let cats = db::category_names(conn, &owner)?;
    let sources = db::source_names(conn, &owner)?;
    let name_of = |map: &std::collections::HashMap<String, String>, id: &str| {
        map.get(id).cloned().unwrap_or_else(|| "(undefined)".into())
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "time", "name", "category", "source", "type", "amount",
            ])?;
            for e in &view {
                wtr.write_record([
                    e.date.to_string(),
                    e.time.clone().unwrap_or_default(),
                    e.name.clone(),
                    name_of(&cats, &e.category_id),
                    name_of(&sources, &e.payment_source_id),
                    e.payment_type.as_str().to_string(),
                    format!("{:.2}", e.amount),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for e in &view {
                items.push(json!({
                    "date": e.date.to_string(),
                    "time": e.time,
                    "name": e.name,
                    "category": name_of(&cats, &e.category_id),
                    "source": name_of(&sources, &e.payment_source_id),
                    "type": e.payment_type.as_str(),
                    "amount": format!("{:.2}", e.amount),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} expenses for {} to {}", view.len(), month, out);
    Ok(())
}
