// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::utils::{get_month_start_day, get_theme, pretty_table, set_month_start_day, set_theme};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-month-start", sub)) => {
            let day = *sub.get_one::<u32>("day").unwrap();
            set_month_start_day(conn, day)?;
            println!("Financial month now starts on day {}", day);
        }
        Some(("set-theme", sub)) => {
            let theme = sub.get_one::<String>("theme").unwrap();
            set_theme(conn, theme)?;
            println!("Theme set to {}", theme);
        }
        Some(("show", _)) => {
            let active: Option<String> = conn
                .query_row(
                    "SELECT o.name FROM owners o JOIN settings s ON s.value=o.id
                     WHERE s.key='current_owner'",
                    [],
                    |r| r.get(0),
                )
                .optional()?;
            let data = vec![
                vec![
                    "month_start_day".to_string(),
                    get_month_start_day(conn)?.to_string(),
                ],
                vec!["theme".to_string(), get_theme(conn)?],
                vec![
                    "profile".to_string(),
                    active.unwrap_or_else(|| "(none)".into()),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], data));
        }
        _ => {}
    }
    Ok(())
}
