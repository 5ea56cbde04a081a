// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn owner_arg() -> Arg {
    Arg::new("owner")
        .long("owner")
        .required(true)
        .help("Owner name the operation is scoped to")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the result as pretty JSON")
}

fn jsonl_arg() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .action(ArgAction::SetTrue)
        .help("Print the result as JSON lines")
}

pub fn build_cli() -> Command {
    Command::new("monthwise")
        .version(crate_version!())
        .about("Installment-aware personal finance ledger")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("owner")
                .about("Manage ledger owners")
                .subcommand(
                    Command::new("add")
                        .about("Register an owner")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List owners"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an owner and everything they own")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(owner_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD; defaults to now"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(owner_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(json_arg())
                        .arg(jsonl_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(owner_arg())
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Create and manage installment plans")
                .subcommand(
                    Command::new("create")
                        .about("Create a plan and generate its monthly installments")
                        .arg(owner_arg())
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .required(true)
                                .value_parser(value_parser!(i64))
                                .help("Number of monthly installments"),
                        )
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .help("Amount of each installment"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .help("First installment date, YYYY-MM-DD; defaults to today"),
                        )
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List plans, newest first")
                        .arg(owner_arg())
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show one plan with its installments")
                        .arg(owner_arg())
                        .arg(id_arg())
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a plan and every installment it generated")
                        .arg(owner_arg())
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated reports")
                .subcommand(
                    Command::new("month")
                        .about("Income/expense summary for one calendar month")
                        .arg(owner_arg())
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(json_arg())
                        .arg(jsonl_arg()),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Search transactions with optional filters")
                .arg(owner_arg())
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Substring of the description, case-insensitive"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .help("income or expense; anything else is ignored"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Substring of the category, case-insensitive"),
                )
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD lower bound"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD upper bound"))
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export one owner's transactions to a file")
                        .arg(owner_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
