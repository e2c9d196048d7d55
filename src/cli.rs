// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("kasbot")
        .version(clap::crate_version!())
        .about("Chat-command cash ledger backed by Google Sheets")
        .arg(
            Arg::new("token")
                .long("token")
                .env("BOT_TOKEN")
                .hide_env_values(true)
                .global(true)
                .help("Telegram bot token"),
        )
        .arg(
            Arg::new("sheet")
                .long("sheet")
                .env("GOOGLE_SHEET_NAME")
                .global(true)
                .help("Spreadsheet name (default: Data Keuangan Bot)"),
        )
        .arg(
            Arg::new("credentials")
                .long("credentials")
                .env("GOOGLE_CREDENTIALS")
                .global(true)
                .help("Service-account JSON key (default: credentials.json)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .env("KASBOT_LOG")
                .global(true)
                .default_value("info")
                .value_parser(["error", "warn", "info", "debug", "trace"]),
        )
        .subcommand(Command::new("run").about("Start the Telegram bot (long polling)"))
        .subcommand(
            Command::new("exec")
                .about("Run one chat command against the sheet and print the reply")
                .arg(
                    Arg::new("words")
                        .required(true)
                        .num_args(1..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("rows").about("Show the most recent rows").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize))
                    .default_value("20"),
            ),
        )
        .subcommand(
            Command::new("export")
                .about("Export all rows")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_parser(["csv", "json"]),
                ),
        )
        .subcommand(Command::new("doctor").about("Check connectivity and row integrity"))
        .subcommand(Command::new("init").about("Write the header row into an empty sheet"))
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Shorthand for --log-level debug"),
        )
}
