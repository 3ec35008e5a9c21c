// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to show (defaults to the current month)")
}

fn rm_cmd(what: &str) -> Command {
    Command::new("rm")
        .about(format!("Delete a {} by id", what))
        .arg(Arg::new("id").required(true).value_name("ID"))
        .arg(
            Arg::new("yes")
                .long("yes")
                .short('y')
                .action(ArgAction::SetTrue)
                .help("Skip the confirmation prompt"),
        )
}

pub fn build_cli() -> Command {
    Command::new("hamster")
        .version(clap::crate_version!())
        .about("부자 햄스터 가계부: household ledger, statistics, savings/loan calculators and a chat assistant")
        .subcommand(Command::new("init").about("Create the database if needed and print its path"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .short('t')
                                .required(true)
                                .value_parser(["income", "expense", "INCOME", "EXPENSE"]),
                        )
                        .arg(Arg::new("category").long("category").short('c').required(true))
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(Arg::new("description").long("description").short('d'))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions of a month or a single day")
                        .arg(month_arg().conflicts_with("date"))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD")),
                )),
        )
        .subcommand(
            Command::new("calendar")
                .about("Show a month as a calendar with daily totals")
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly and yearly statistics")
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Monthly summary and category ranking")
                        .arg(month_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .short('t')
                                .default_value("expense")
                                .value_parser(["income", "expense", "INCOME", "EXPENSE"]),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("year").about("Twelve-month trend").arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32))
                            .help("Defaults to the current year"),
                    ),
                )),
        )
        .subcommand(
            Command::new("fixed")
                .about("Recurring fixed expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(value_parser!(u32))
                                .help("Day of month the payment leaves (1-31)"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(rm_cmd("fixed expense")),
        )
        .subcommand(
            Command::new("saving")
                .about("Savings products and their maturity value")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["installment", "deposit", "INSTALLMENT", "DEPOSIT"]),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Monthly contribution (installment) or principal (deposit)"),
                        )
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .required(true)
                                .help("Annual rate in percent"),
                        )
                        .arg(
                            Arg::new("term")
                                .long("term")
                                .required(true)
                                .value_parser(value_parser!(u32))
                                .help("Term in months"),
                        )
                        .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(rm_cmd("saving")),
        )
        .subcommand(
            Command::new("loan")
                .about("Loans and their monthly payment")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("principal").long("principal").required(true))
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .required(true)
                                .help("Annual rate in percent"),
                        )
                        .arg(
                            Arg::new("term")
                                .long("term")
                                .required(true)
                                .value_parser(value_parser!(u32))
                                .help("Repayment term in months"),
                        )
                        .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(rm_cmd("loan")),
        )
        .subcommand(Command::new("chat").about("Talk to the ledger assistant (type 'exit' to leave)"))
        .subcommand(
            Command::new("ask")
                .about("Send a single message to the ledger assistant")
                .arg(Arg::new("message").required(true).num_args(1..).trailing_var_arg(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Assistant settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-key").arg(Arg::new("key").required(true)))
                .subcommand(Command::new("set-model").arg(Arg::new("model").required(true)))
                .subcommand(Command::new("set-endpoint").arg(Arg::new("url").required(true)))
                .subcommand(
                    Command::new("set-timeout").arg(
                        Arg::new("secs")
                            .required(true)
                            .value_parser(value_parser!(u64)),
                    ),
                ),
        )
}
