// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("outgo")
        .about("Personal and family expense tracking")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("profile")
                .about("Manage owner profiles")
                .subcommand(
                    Command::new("add")
                        .about("Create a profile")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("use")
                        .about("Switch the active profile")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List profiles")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage expense categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .default_value("#8884d8")
                                .help("Hex color used in charts"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Rename or recolor a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("new-name").long("name"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category and all expenses filed under it")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("source")
                .about("Manage payment sources")
                .subcommand(
                    Command::new("add")
                        .about("Add a payment source")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("cash|credit|bank|other"),
                        )
                        .arg(Arg::new("color").long("color").default_value("#82ca9d")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List payment sources")
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Rename, retype, or recolor a payment source")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("new-name").long("name"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a payment source (existing expenses keep the reference)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and browse expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense (one-time, installments, or recurring)")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("time").long("time").help("HH:MM, display only"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("source").long("source").required(true))
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .value_parser(value_parser!(u32))
                                .help("Split the amount into N monthly installments (N >= 2)"),
                        )
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .help("Repeat monthly (capped at 12 occurrences)"),
                        )
                        .arg(
                            Arg::new("until")
                                .long("until")
                                .help("Last date a recurring expense may fall on (YYYY-MM-DD)"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List expenses for a financial month")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("Financial month YYYY-MM; defaults to the current one"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("source").long("source"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a single expense entry")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("time").long("time"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("source").long("source")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a single expense entry")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregate a financial month")
                .subcommand(
                    Command::new("by-category")
                        .about("Spend per category")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("by-source")
                        .about("Spend per payment source")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Entry count and total")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("expenses")
                        .about("Export a financial month of expenses")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("month").long("month")),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(
                    Command::new("set-month-start")
                        .about("Day of month (1-31) a new financial month begins on")
                        .arg(
                            Arg::new("day")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(
                    Command::new("set-theme")
                        .about("Display theme (no effect on calculations)")
                        .arg(Arg::new("theme").required(true)),
                )
                .subcommand(Command::new("show").about("Show current settings")),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
