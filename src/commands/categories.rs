// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Utc;
use rusqlite::{Connection, params};

use crate::engine::ids::{IdGenerator, UuidGenerator};
use crate::utils::{current_owner, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            if name.is_empty() {
                bail!("Category name must not be empty");
            }
            let color = sub.get_one::<String>("color").unwrap();
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO categories(id, name, color, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![UuidGenerator.generate(), name, color, owner, now],
            )?;
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => {
            let owner = current_owner(conn)?;
            let mut stmt = conn.prepare(
                "SELECT name, color, created_at FROM categories WHERE owner_id=?1 ORDER BY name",
            )?;
            let rows = stmt.query_map(params![owner], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, c, cr) = row?;
                data.push(vec![n, c, cr]);
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!("{}", pretty_table(&["Category", "Color", "Created"], data));
            }
        }
        Some(("edit", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap();
            if let Some(color) = sub.get_one::<String>("color") {
                let n = conn.execute(
                    "UPDATE categories SET color=?1, updated_at=?2 WHERE owner_id=?3 AND name=?4",
                    params![color, Utc::now().to_rfc3339(), owner, name],
                )?;
                if n == 0 {
                    bail!("Category '{}' not found", name);
                }
            }
            if let Some(new_name) = sub.get_one::<String>("new-name") {
                let new_name = new_name.trim();
                if new_name.is_empty() {
                    bail!("Category name must not be empty");
                }
                let n = conn.execute(
                    "UPDATE categories SET name=?1, updated_at=?2 WHERE owner_id=?3 AND name=?4",
                    params![new_name, Utc::now().to_rfc3339(), owner, name],
                )?;
                if n == 0 {
                    bail!("Category '{}' not found", name);
                }
            }
            println!("Updated category '{}'", name);
        }
        Some(("rm", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute(
                "DELETE FROM categories WHERE owner_id=?1 AND name=?2",
                params![owner, name],
            )?;
            if n == 0 {
                bail!("Category '{}' not found", name);
            }
            // expenses filed under the category go with it (FK cascade)
            println!("Removed category '{}' and its expenses", name);
        }
        _ => {}
    }
    Ok(())
}
