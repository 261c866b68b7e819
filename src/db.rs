// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::models::{Expense, PaymentType, RecurrenceType};
use crate::utils::parse_date;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Outgo", "outgo"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("outgo.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS owners(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        color TEXT NOT NULL,
        owner_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(owner_id, name),
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS payment_sources(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('cash','credit','bank','other')),
        color TEXT NOT NULL,
        owner_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(owner_id, name),
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );

    -- payment_source_id carries no foreign key: deleting a source leaves
    -- dangling references, which views render as "(undefined)".
    CREATE TABLE IF NOT EXISTS expenses(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        time TEXT,
        category_id TEXT NOT NULL,
        payment_source_id TEXT NOT NULL,
        payment_type TEXT NOT NULL CHECK(payment_type IN ('one-time','installment','recurring')),
        owner_id TEXT NOT NULL,
        installment_number INTEGER,
        total_installments INTEGER,
        related_expense_id TEXT,
        recurrence_id TEXT,
        recurrence_type TEXT,
        recurring_end_date TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE,
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_owner_date ON expenses(owner_id, date);
    "#,
    )?;
    Ok(())
}

const EXPENSE_COLS: &str = "id, name, amount, date, time, category_id, payment_source_id, \
     payment_type, owner_id, installment_number, total_installments, related_expense_id, \
     recurrence_id, recurrence_type, recurring_end_date, created_at, updated_at";

pub fn insert_expense(conn: &Connection, e: &Expense) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO expenses({}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17)",
            EXPENSE_COLS
        ),
        params![
            e.id,
            e.name,
            e.amount.to_string(),
            e.date.to_string(),
            e.time,
            e.category_id,
            e.payment_source_id,
            e.payment_type.as_str(),
            e.owner_id,
            e.installment_number,
            e.total_installments,
            e.related_expense_id,
            e.recurrence_id,
            e.recurrence_type.map(|t| t.as_str()),
            e.recurring_end_date.map(|d| d.to_string()),
            e.created_at.to_rfc3339(),
            e.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Persists a generated batch all-or-nothing; a failure part-way rolls the
/// whole insert back.
pub fn insert_expenses(conn: &mut Connection, batch: &[Expense]) -> Result<()> {
    let tx = conn.transaction()?;
    for e in batch {
        tx.execute(
            &format!(
                "INSERT INTO expenses({}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17)",
                EXPENSE_COLS
            ),
            params![
                e.id,
                e.name,
                e.amount.to_string(),
                e.date.to_string(),
                e.time,
                e.category_id,
                e.payment_source_id,
                e.payment_type.as_str(),
                e.owner_id,
                e.installment_number,
                e.total_installments,
                e.related_expense_id,
                e.recurrence_id,
                e.recurrence_type.map(|t| t.as_str()),
                e.recurring_end_date.map(|d| d.to_string()),
                e.created_at.to_rfc3339(),
                e.updated_at.to_rfc3339(),
            ],
        )?;
    }
    tx.commit()?;
    Ok(())
}

fn expense_from_row(r: &Row) -> Result<Expense> {
    let id: String = r.get(0)?;
    let amount_s: String = r.get(2)?;
    let date_s: String = r.get(3)?;
    let payment_type_s: String = r.get(7)?;
    let recurrence_type_s: Option<String> = r.get(13)?;
    let end_date_s: Option<String> = r.get(14)?;
    let created_s: String = r.get(15)?;
    let updated_s: String = r.get(16)?;

    Ok(Expense {
        name: r.get(1)?,
        amount: amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' for expense {}", amount_s, id))?,
        date: parse_date(&date_s)?,
        time: r.get(4)?,
        category_id: r.get(5)?,
        payment_source_id: r.get(6)?,
        payment_type: PaymentType::parse(&payment_type_s)
            .ok_or_else(|| anyhow!("Unknown payment type '{}' for expense {}", payment_type_s, id))?,
        owner_id: r.get(8)?,
        installment_number: r.get(9)?,
        total_installments: r.get(10)?,
        related_expense_id: r.get(11)?,
        recurrence_id: r.get(12)?,
        recurrence_type: match recurrence_type_s {
            Some(s) => Some(
                RecurrenceType::parse(&s)
                    .ok_or_else(|| anyhow!("Unknown recurrence type '{}' for expense {}", s, id))?,
            ),
            None => None,
        },
        recurring_end_date: end_date_s.as_deref().map(parse_date).transpose()?,
        created_at: parse_timestamp(&created_s)?,
        updated_at: parse_timestamp(&updated_s)?,
        id,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid timestamp '{}'", s))?
        .with_timezone(&Utc))
}

/// The storage collaborator's `listAll`: the full ledger for one owner.
pub fn list_expenses(conn: &Connection, owner_id: &str) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM expenses WHERE owner_id=?1 ORDER BY date, created_at, id",
        EXPENSE_COLS
    ))?;
    let mut rows = stmt.query(params![owner_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(expense_from_row(r)?);
    }
    Ok(out)
}

pub fn get_expense(conn: &Connection, owner_id: &str, id: &str) -> Result<Option<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM expenses WHERE owner_id=?1 AND id=?2",
        EXPENSE_COLS
    ))?;
    let mut rows = stmt.query(params![owner_id, id])?;
    match rows.next()? {
        Some(r) => Ok(Some(expense_from_row(r)?)),
        None => Ok(None),
    }
}

pub fn update_expense(conn: &Connection, e: &Expense) -> Result<()> {
    conn.execute(
        "UPDATE expenses SET name=?1, amount=?2, date=?3, time=?4, category_id=?5,
         payment_source_id=?6, updated_at=?7 WHERE owner_id=?8 AND id=?9",
        params![
            e.name,
            e.amount.to_string(),
            e.date.to_string(),
            e.time,
            e.category_id,
            e.payment_source_id,
            e.updated_at.to_rfc3339(),
            e.owner_id,
            e.id,
        ],
    )?;
    Ok(())
}

pub fn delete_expense(conn: &Connection, owner_id: &str, id: &str) -> Result<usize> {
    let n = conn.execute(
        "DELETE FROM expenses WHERE owner_id=?1 AND id=?2",
        params![owner_id, id],
    )?;
    Ok(n)
}

/// id -> name lookup for rendering category references; dangling ids simply
/// miss the map.
pub fn category_names(conn: &Connection, owner_id: &str) -> Result<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT id, name FROM categories WHERE owner_id=?1")?;
    let rows = stmt.query_map(params![owner_id], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut map = HashMap::new();
    for row in rows {
        let (id, name) = row?;
        map.insert(id, name);
    }
    Ok(map)
}

pub fn source_names(conn: &Connection, owner_id: &str) -> Result<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT id, name FROM payment_sources WHERE owner_id=?1")?;
    let rows = stmt.query_map(params![owner_id], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut map = HashMap::new();
    for row in rows {
        let (id, name) = row?;
        map.insert(id, name);
    }
    Ok(map)
}

pub fn owner_id_for(conn: &Connection, name: &str) -> Result<Option<String>> {
    let id: Option<String> = conn
        .query_row("SELECT id FROM owners WHERE name=?1", params![name], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(id)
}
