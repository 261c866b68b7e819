// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Datelike, NaiveDate, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::engine::fiscal::{DEFAULT_MONTH_START_DAY, FinancialMonth};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_time(s: &str) -> Result<String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .with_context(|| format!("Invalid time '{}', expected HH:MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_financial_month(s: &str) -> Result<FinancialMonth> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(FinancialMonth {
        year: first.year(),
        month: first.month(),
    })
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
) -> Result<bool> {
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

pub fn id_for_category(conn: &Connection, owner_id: &str, name: &str) -> Result<String> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE owner_id=?1 AND name=?2")?;
    let id: String = stmt
        .query_row(params![owner_id, name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_source(conn: &Connection, owner_id: &str, name: &str) -> Result<String> {
    let mut stmt = conn.prepare("SELECT id FROM payment_sources WHERE owner_id=?1 AND name=?2")?;
    let id: String = stmt
        .query_row(params![owner_id, name], |r| r.get(0))
        .with_context(|| format!("Payment source '{}' not found", name))?;
    Ok(id)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// Financial-month start day settings
pub fn get_month_start_day(conn: &Connection) -> Result<u32> {
    match get_setting(conn, "month_start_day")? {
        Some(s) => {
            let day: u32 = s
                .parse()
                .with_context(|| format!("Invalid month start day '{}'", s))?;
            Ok(day)
        }
        None => Ok(DEFAULT_MONTH_START_DAY),
    }
}

pub fn set_month_start_day(conn: &Connection, day: u32) -> Result<()> {
    if !(1..=31).contains(&day) {
        bail!("Month start day must be between 1 and 31, got {}", day);
    }
    set_setting(conn, "month_start_day", &day.to_string())
}

// Theme is display-only; the engine never reads it
pub fn get_theme(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "theme")?.unwrap_or_else(|| "light".to_string()))
}

pub fn set_theme(conn: &Connection, theme: &str) -> Result<()> {
    set_setting(conn, "theme", theme)
}

/// The identity collaborator: the opaque id of the active profile. Every
/// expense command resolves this before touching the ledger.
pub fn current_owner(conn: &Connection) -> Result<String> {
    get_setting(conn, "current_owner")?
        .ok_or_else(|| anyhow!("No active profile; run 'outgo profile use <name>' first"))
}

pub fn set_current_owner(conn: &Connection, owner_id: &str) -> Result<()> {
    set_setting(conn, "current_owner", owner_id)
}
