// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use tempfile::tempdir;

use outgo::{cli, commands::exporter, commands::expenses, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO owners(id,name) VALUES('owner-1','ana')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO settings(key,value) VALUES('current_owner','owner-1')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO categories(id,name,color,owner_id,created_at,updated_at) \
         VALUES('cat-1','Groceries','#8884d8','owner-1','2025-01-01T00:00:00+00:00','2025-01-01T00:00:00+00:00')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO payment_sources(id,name,type,color,owner_id,created_at,updated_at) \
         VALUES('src-1','Visa','credit','#82ca9d','owner-1','2025-01-01T00:00:00+00:00','2025-01-01T00:00:00+00:00')",
        [],
    )
    .unwrap();
    conn
}

fn add(conn: &mut Connection, name: &str, amount: &str, date: &str) {
    let matches = cli::build_cli().get_matches_from([
        "outgo", "expense", "add", name, "--amount", amount, "--date", date, "--category",
        "Groceries", "--source", "Visa",
    ]);
    if let Some(("expense", sub)) = matches.subcommand() {
        expenses::handle(conn, sub).unwrap();
    }
}

fn export(conn: &Connection, args: &[&str]) {
    let mut argv = vec!["outgo", "export", "expenses"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", sub)) = matches.subcommand() {
        exporter::handle(conn, sub).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn csv_export_contains_only_the_selected_financial_month() {
    let mut conn = setup();
    add(&mut conn, "In month", "12.00", "2025-05-15");
    add(&mut conn, "Also in month", "8.50", "2025-06-05");
    add(&mut conn, "Other month", "99.00", "2025-06-20");

    let dir = tempdir().unwrap();
    let out = dir.path().join("may.csv");
    export(
        &conn,
        &["--format", "csv", "--out", out.to_str().unwrap(), "--month", "2025-05"],
    );

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3); // header + two May entries
    assert_eq!(lines[0], "date,time,name,category,source,type,amount");
    assert!(content.contains("In month"));
    assert!(content.contains("Also in month"));
    assert!(!content.contains("Other month"));
    assert!(content.contains("Groceries"));
    assert!(content.contains("Visa"));
}

#[test]
fn json_export_renders_resolved_names_and_amounts() {
    let mut conn = setup();
    add(&mut conn, "Corner shop", "12.34", "2025-05-15");

    let dir = tempdir().unwrap();
    let out = dir.path().join("may.json");
    export(
        &conn,
        &["--format", "json", "--out", out.to_str().unwrap(), "--month", "2025-05"],
    );

    let content = std::fs::read_to_string(&out).unwrap();
    let items: serde_json::Value = serde_json::from_str(&content).unwrap();
    let arr = items.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Corner shop");
    assert_eq!(arr[0]["category"], "Groceries");
    assert_eq!(arr[0]["source"], "Visa");
    assert_eq!(arr[0]["amount"], "12.34");
}

#[test]
fn export_renders_dangling_source_as_undefined() {
    let mut conn = setup();
    add(&mut conn, "Paid somehow", "5.00", "2025-05-15");
    conn.execute("DELETE FROM payment_sources WHERE id='src-1'", [])
        .unwrap();

    let dir = tempdir().unwrap();
    let out = dir.path().join("may.csv");
    export(
        &conn,
        &["--format", "csv", "--out", out.to_str().unwrap(), "--month", "2025-05"],
    );

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("(undefined)"));
}
