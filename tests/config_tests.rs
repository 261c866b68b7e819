// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use outgo::{cli, commands, db, utils};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn month_start_day_defaults_to_eleven() {
    let conn = setup();
    assert_eq!(utils::get_month_start_day(&conn).unwrap(), 11);
}

#[test]
fn set_month_start_persists() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["outgo", "config", "set-month-start", "25"]);
    if let Some(("config", sub)) = matches.subcommand() {
        commands::config::handle(&conn, sub).unwrap();
    }
    assert_eq!(utils::get_month_start_day(&conn).unwrap(), 25);
}

#[test]
fn out_of_range_start_day_is_rejected() {
    let conn = setup();
    assert!(utils::set_month_start_day(&conn, 0).is_err());
    assert!(utils::set_month_start_day(&conn, 32).is_err());
    assert!(utils::set_month_start_day(&conn, 1).is_ok());
    assert!(utils::set_month_start_day(&conn, 31).is_ok());
}

#[test]
fn no_active_profile_is_an_error() {
    let conn = setup();
    let err = utils::current_owner(&conn).unwrap_err();
    assert!(err.to_string().contains("No active profile"));
}

#[test]
fn first_profile_becomes_active() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["outgo", "profile", "add", "ana"]);
    if let Some(("profile", sub)) = matches.subcommand() {
        commands::profiles::handle(&conn, sub).unwrap();
    }
    let owner = utils::current_owner(&conn).unwrap();
    let name: String = conn
        .query_row(
            "SELECT name FROM owners WHERE id=?1",
            [&owner],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(name, "ana");
}

#[test]
fn profile_use_switches_the_owner() {
    let conn = setup();
    for name in ["ana", "ben"] {
        let matches = cli::build_cli().get_matches_from(["outgo", "profile", "add", name]);
        if let Some(("profile", sub)) = matches.subcommand() {
            commands::profiles::handle(&conn, sub).unwrap();
        }
    }
    let matches = cli::build_cli().get_matches_from(["outgo", "profile", "use", "ben"]);
    if let Some(("profile", sub)) = matches.subcommand() {
        commands::profiles::handle(&conn, sub).unwrap();
    }
    let owner = utils::current_owner(&conn).unwrap();
    let name: String = conn
        .query_row(
            "SELECT name FROM owners WHERE id=?1",
            [&owner],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(name, "ben");
}

#[test]
fn theme_is_stored_but_is_display_only() {
    let conn = setup();
    utils::set_theme(&conn, "dark").unwrap();
    assert_eq!(utils::get_theme(&conn).unwrap(), "dark");
    // calculations are untouched by the theme
    assert_eq!(utils::get_month_start_day(&conn).unwrap(), 11);
}
