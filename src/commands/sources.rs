// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Utc;
use rusqlite::{Connection, params};

use crate::engine::ids::{IdGenerator, UuidGenerator};
use crate::models::SourceType;
use crate::utils::{current_owner, maybe_print_json, pretty_table};

fn parse_type(s: &str) -> Result<SourceType> {
    match SourceType::parse(s) {
        Some(t) => Ok(t),
        None => bail!("Invalid source type '{}' (use cash|credit|bank|other)", s),
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            if name.is_empty() {
                bail!("Payment source name must not be empty");
            }
            let typ = parse_type(sub.get_one::<String>("type").unwrap())?;
            let color = sub.get_one::<String>("color").unwrap();
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO payment_sources(id, name, type, color, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![UuidGenerator.generate(), name, typ.as_str(), color, owner, now],
            )?;
            println!("Added payment source '{}' ({})", name, typ.as_str());
        }
        Some(("list", sub)) => {
            let owner = current_owner(conn)?;
            let mut stmt = conn.prepare(
                "SELECT name, type, color, created_at FROM payment_sources WHERE owner_id=?1 ORDER BY name",
            )?;
            let rows = stmt.query_map(params![owner], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, t, c, cr) = row?;
                data.push(vec![n, t, c, cr]);
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!(
                    "{}",
                    pretty_table(&["Source", "Type", "Color", "Created"], data)
                );
            }
        }
        Some(("edit", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap();
            let mut touched = false;
            if let Some(new_name) = sub.get_one::<String>("new-name") {
                let new_name = new_name.trim();
                if new_name.is_empty() {
                    bail!("Payment source name must not be empty");
                }
                touched = update_field(conn, &owner, name, "name", new_name)?;
            }
            if let Some(t) = sub.get_one::<String>("type") {
                let typ = parse_type(t)?;
                touched = update_field(conn, &owner, name, "type", typ.as_str())? || touched;
            }
            if let Some(color) = sub.get_one::<String>("color") {
                touched = update_field(conn, &owner, name, "color", color)? || touched;
            }
            if touched {
                println!("Updated payment source '{}'", name);
            } else {
                bail!("Payment source '{}' not found", name);
            }
        }
        Some(("rm", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute(
                "DELETE FROM payment_sources WHERE owner_id=?1 AND name=?2",
                params![owner, name],
            )?;
            if n == 0 {
                bail!("Payment source '{}' not found", name);
            }
            println!("Removed payment source '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn update_field(
    conn: &Connection,
    owner: &str,
    name: &str,
    column: &str,
    value: &str,
) -> Result<bool> {
    // column comes from a fixed set above, never from user input
    let n = conn.execute(
        &format!(
            "UPDATE payment_sources SET {}=?1, updated_at=?2 WHERE owner_id=?3 AND name=?4",
            column
        ),
        params![value, Utc::now().to_rfc3339(), owner, name],
    )?;
    Ok(n > 0)
}
