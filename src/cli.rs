// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::builder::BoolishValueParser;
use clap::{crate_version, Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .required(true)
        .help("Acting user id; commands fail if it does not own the target")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("monthbook")
        .version(crate_version!())
        .about("Monthly budget tracking with consistent savings, loan, and cashflow aggregates")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("signup")
                .about("Create the account for a new user")
                .arg(user_arg())
                .arg(
                    Arg::new("income")
                        .long("income")
                        .required(true)
                        .help("Annual income"),
                )
                .arg(
                    Arg::new("savings")
                        .long("savings")
                        .help("Starting savings balance (default 0)"),
                )
                .arg(
                    Arg::new("loans")
                        .long("loans")
                        .help("Outstanding loan balance (default 0)"),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Show or update the account")
                .subcommand(json_flags(Command::new("show").arg(user_arg())))
                .subcommand(
                    Command::new("set-income")
                        .about("Update the annual income; existing periods keep their snapshot")
                        .arg(user_arg())
                        .arg(Arg::new("income").long("income").required(true)),
                ),
        )
        .subcommand(
            Command::new("period")
                .about("Manage month trackers")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(Arg::new("year").long("year").required(true)
                            .value_parser(clap::value_parser!(i32)))
                        .arg(Arg::new("budget").long("budget").help("Spending ceiling, informational")),
                )
                .subcommand(json_flags(Command::new("list").arg(user_arg())))
                .subcommand(json_flags(Command::new("show").arg(user_arg()).arg(id_arg())))
                .subcommand(
                    Command::new("edit")
                        .arg(user_arg())
                        .arg(id_arg())
                        .arg(Arg::new("take-home").long("take-home").help("New annual take-home"))
                        .arg(Arg::new("budget").long("budget")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a period and all of its expenses")
                        .arg(user_arg())
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Manage expenses")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(Arg::new("period").long("period").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD; defaults to today"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .help("Also register a recurring template on the account"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(user_arg())
                        .arg(Arg::new("period").long("period").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("match")
                                .long("match")
                                .help("Only expenses whose name matches this regex"),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(user_arg())
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .value_parser(BoolishValueParser::new())
                                .help("true|false: mark or un-mark as recurring"),
                        ),
                )
                .subcommand(Command::new("rm").arg(user_arg()).arg(id_arg())),
        )
        .subcommand(
            Command::new("export")
                .about("Export all expenses as CSV")
                .arg(user_arg())
                .arg(Arg::new("out").long("out").help("Output file; stdout if omitted")),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check the stored aggregates against the raw expense sums")
                .arg(user_arg()),
        )
}
