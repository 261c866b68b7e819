// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension, params};

use crate::db;
use crate::engine::ids::{IdGenerator, UuidGenerator};
use crate::utils::{pretty_table, set_current_owner};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            if name.is_empty() {
                bail!("Profile name must not be empty");
            }
            let id = UuidGenerator.generate();
            conn.execute(
                "INSERT INTO owners(id, name) VALUES (?1, ?2)",
                params![id, name],
            )?;
            // first profile becomes active right away
            let active: Option<String> = conn
                .query_row(
                    "SELECT value FROM settings WHERE key='current_owner'",
                    [],
                    |r| r.get(0),
                )
                .optional()?;
            if active.is_none() {
                set_current_owner(conn, &id)?;
                println!("Added profile '{}' (now active)", name);
            } else {
                println!("Added profile '{}'", name);
            }
        }
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            match db::owner_id_for(conn, name)? {
                Some(id) => {
                    set_current_owner(conn, &id)?;
                    println!("Switched to profile '{}'", name);
                }
                None => bail!("Profile '{}' not found", name),
            }
        }
        Some(("list", _)) => {
            let active: Option<String> = conn
                .query_row(
                    "SELECT value FROM settings WHERE key='current_owner'",
                    [],
                    |r| r.get(0),
                )
                .optional()?;
            let mut stmt = conn.prepare("SELECT id, name, created_at FROM owners ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (id, name, created) = row?;
                let marker = if Some(&id) == active.as_ref() { "*" } else { "" };
                data.push(vec![name, marker.to_string(), created]);
            }
            println!("{}", pretty_table(&["Profile", "Active", "Created"], data));
        }
        _ => {}
    }
    Ok(())
}
