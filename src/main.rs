// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::stderr;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use kasbot::commands::{self, parse_command};
use kasbot::config::Settings;
use kasbot::store::{Connect, LedgerStore};
use kasbot::telegram::Bot;
use kasbot::utils::strip_html;
use kasbot::cli;

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::DEBUG
    } else {
        parse_log_level(matches.get_one::<String>("log-level").map(String::as_str))
    };
    setup_logging(level);

    let settings = Settings::from_matches(&matches);
    let connector = settings.connector();

    match matches.subcommand() {
        Some(("exec", sub)) => {
            let words: Vec<String> = sub
                .get_many::<String>("words")
                .map(|w| w.cloned().collect())
                .unwrap_or_default();
            let line = words.join(" ");
            match parse_command(&line, None) {
                Some(command) => {
                    let reply =
                        commands::dispatch(&connector, &command, None, Local::now().naive_local());
                    println!("{}", strip_html(&reply.text));
                }
                None => eprintln!("Unknown command: {}", line),
            }
        }
        Some(("rows", sub)) => commands::rows::handle(&connector, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&connector, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&connector)?,
        Some(("init", _)) => {
            let mut store = connector.connect()?;
            if store.ensure_header()? {
                println!("Header row written to '{}'", settings.sheet_name);
            } else {
                println!("'{}' already has rows; left untouched", settings.sheet_name);
            }
        }
        // `run` and no subcommand both start the bot
        _ => {
            let token = settings
                .bot_token
                .as_deref()
                .context("Bot token missing; set BOT_TOKEN or pass --token")?;
            Bot::new(token)?.run(&connector)?;
        }
    }
    Ok(())
}

fn parse_log_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info") {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries command output; logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
