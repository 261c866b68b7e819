// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow, bail};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::engine::aggregate::{self, FilterKind};
use crate::engine::expand::{
    build_expense, build_recurring_origin, expand_installments, expand_recurring, validate,
};
use crate::engine::fiscal::FinancialMonth;
use crate::engine::ids::UuidGenerator;
use crate::engine::input::{InstallmentInput, OneTimeInput, RecurringInput};
use crate::utils::{
    current_owner, get_month_start_day, id_for_category, id_for_source, maybe_print_json,
    parse_date, parse_decimal, parse_financial_month, parse_time, pretty_table,
};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let name = sub.get_one::<String>("name").unwrap().clone();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let time = sub
        .get_one::<String>("time")
        .map(|s| parse_time(s))
        .transpose()?;
    let category_id = id_for_category(conn, &owner, sub.get_one::<String>("category").unwrap())?;
    let source_id = id_for_source(conn, &owner, sub.get_one::<String>("source").unwrap())?;

    if sub.get_one::<String>("until").is_some() && !sub.get_flag("recurring") {
        bail!("--until only applies together with --recurring");
    }

    let ids = UuidGenerator;
    let now = Utc::now();

    if let Some(&count) = sub.get_one::<u32>("installments") {
        let input = InstallmentInput {
            name: name.clone(),
            total_amount: amount,
            count,
            start_date: date,
            time,
            category_id,
            payment_source_id: source_id,
        };
        let batch = expand_installments(&input, &owner, &ids, now)?;
        db::insert_expenses(conn, &batch)?;
        println!(
            "Recorded '{}' as {} monthly installments totalling {}",
            name, count, amount
        );
    } else if sub.get_flag("recurring") {
        let end_date = sub
            .get_one::<String>("until")
            .map(|s| parse_date(s))
            .transpose()?;
        let input = RecurringInput {
            name: name.clone(),
            amount,
            start_date: date,
            end_date,
            time,
            category_id,
            payment_source_id: source_id,
        };
        let origin = build_recurring_origin(&input, &owner, &ids, now)?;
        let members = expand_recurring(&origin, &ids, now);
        let upcoming = members.len();
        let mut batch = Vec::with_capacity(upcoming + 1);
        batch.push(origin);
        batch.extend(members);
        db::insert_expenses(conn, &batch)?;
        println!(
            "Recorded recurring '{}' with {} upcoming monthly occurrences",
            name, upcoming
        );
    } else {
        let input = OneTimeInput {
            name,
            amount,
            date,
            time,
            category_id,
            payment_source_id: source_id,
        };
        let e = build_expense(&input, &owner, &ids, now)?;
        db::insert_expense(conn, &e)?;
        println!("Recorded {} on {} for '{}'", e.amount, e.date, e.name);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub time: String,
    pub name: String,
    pub category: String,
    pub source: String,
    pub r#type: String,
    pub amount: String,
}

/// Resolves the requested financial month (or the current one), filters the
/// owner's ledger through the engine, and renders name lookups.
pub fn month_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let owner = current_owner(conn)?;
    let start_day = get_month_start_day(conn)?;
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_financial_month(s)?,
        None => FinancialMonth::current(Utc::now().date_naive(), start_day),
    };

    let ledger = db::list_expenses(conn, &owner)?;
    let mut view = aggregate::filter_by_financial_month(&ledger, month, start_day);
    if let Some(cat) = sub.get_one::<String>("category") {
        let cat_id = id_for_category(conn, &owner, cat)?;
        view = aggregate::filter_by_reference(&view, &cat_id, FilterKind::Category);
    }
    if let Some(src) = sub.get_one::<String>("source") {
        let src_id = id_for_source(conn, &owner, src)?;
        view = aggregate::filter_by_reference(&view, &src_id, FilterKind::Source);
    }
    let mut view = aggregate::sort_by_date_desc(&view);
    if let Some(&limit) = sub.get_one::<usize>("limit") {
        view.truncate(limit);
    }

    let cats = db::category_names(conn, &owner)?;
    let sources = db::source_names(conn, &owner)?;
    Ok(view
        .into_iter()
        .map(|e| ExpenseRow {
            date: e.date.to_string(),
            time: e.time.clone().unwrap_or_default(),
            category: cats
                .get(&e.category_id)
                .cloned()
                .unwrap_or_else(|| "(undefined)".into()),
            source: sources
                .get(&e.payment_source_id)
                .cloned()
                .unwrap_or_else(|| "(undefined)".into()),
            r#type: e.payment_type.as_str().to_string(),
            amount: format!("{:.2}", e.amount),
            name: e.name,
            id: e.id,
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = month_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.time.clone(),
                    r.name.clone(),
                    r.category.clone(),
                    r.source.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Time", "Name", "Category", "Source", "Type", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = sub.get_one::<String>("id").unwrap();
    let mut e = db::get_expense(conn, &owner, id)?
        .ok_or_else(|| anyhow!("Expense '{}' not found", id))?;

    if let Some(n) = sub.get_one::<String>("name") {
        e.name = n.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        e.amount = parse_decimal(a)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        e.date = parse_date(d)?;
    }
    if let Some(t) = sub.get_one::<String>("time") {
        e.time = Some(parse_time(t)?);
    }
    if let Some(c) = sub.get_one::<String>("category") {
        e.category_id = id_for_category(conn, &owner, c)?;
    }
    if let Some(s) = sub.get_one::<String>("source") {
        e.payment_source_id = id_for_source(conn, &owner, s)?;
    }
    validate(&e)?;
    e.updated_at = Utc::now();
    db::update_expense(conn, &e)?;
    println!("Updated expense {}", e.id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = sub.get_one::<String>("id").unwrap();
    let n = db::delete_expense(conn, &owner, id)?;
    if n == 0 {
        bail!("Expense '{}' not found", id);
    }
    println!("Removed expense {}", id);
    Ok(())
}
