// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod doctor;
pub mod exporter;
pub mod help;
pub mod record;
pub mod report;
pub mod rows;
pub mod undo;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info};

use crate::error::LedgerError;
use crate::models::Kind;
use crate::store::Connect;

/// Text sent back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub html: bool,
}

impl Reply {
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: true,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: false,
        }
    }
}

impl From<LedgerError> for Reply {
    fn from(err: LedgerError) -> Self {
        Reply::plain(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Record(Kind, Vec<String>),
    Report,
    DeleteLast,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Record(Kind::Income, _) => "masuk",
            Command::Record(Kind::Expense, _) => "keluar",
            Command::Report => "laporan",
            Command::DeleteLast => "hapus_terakhir",
        }
    }
}

/// Who sent the command, when the transport knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub first_name: String,
}

static COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/([A-Za-z0-9_]+)(?:@([A-Za-z0-9_]+))?$").unwrap());

/// Split a chat message into a command and its argument tokens.
///
/// Returns `None` for plain text, for commands the bot does not know, and
/// for `/cmd@OtherBot` when `bot_username` names this bot. Telegram
/// usernames compare case-insensitively.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?;
    let caps = COMMAND.captures(head)?;
    if let (Some(addressee), Some(me)) = (caps.get(2), bot_username) {
        if !addressee.as_str().eq_ignore_ascii_case(me) {
            return None;
        }
    }
    let name = caps.get(1)?.as_str();
    let args: Vec<String> = tokens.map(str::to_string).collect();
    match name {
        "start" | "help" => Some(Command::Help),
        "masuk" => Some(Command::Record(Kind::Income, args)),
        "keluar" => Some(Command::Record(Kind::Expense, args)),
        "laporan" => Some(Command::Report),
        "hapus_terakhir" => Some(Command::DeleteLast),
        _ => None,
    }
}

/// Run one command to completion. Every outcome, failures included, ends
/// up as reply text.
pub fn dispatch<C: Connect>(
    connector: &C,
    command: &Command,
    sender: Option<&Sender>,
    now: NaiveDateTime,
) -> Reply {
    let outcome = match command {
        Command::Help => Ok(Reply::html(help::usage(sender))),
        Command::Record(kind, args) => record::record(connector, *kind, args, now)
            .map(|tx| Reply::html(record::render(&tx))),
        Command::Report => {
            report::monthly_report(connector, now).map(|r| Reply::html(report::render(&r)))
        }
        Command::DeleteLast => undo::delete_last(connector).map(|row| Reply::html(undo::render(&row))),
    };
    match outcome {
        Ok(reply) => reply,
        Err(e) => {
            if e.is_informational() {
                info!(command = command.name(), "{}", e);
            } else {
                error!(command = command.name(), "command failed: {:?}", e);
            }
            Reply::from(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_own_bot_suffix() {
        assert_eq!(parse_command("/laporan@KasBot", Some("KasBot")), Some(Command::Report));
        assert_eq!(parse_command("/laporan@kasbot", Some("KasBot")), Some(Command::Report));
        assert_eq!(parse_command("/help", Some("KasBot")), Some(Command::Help));
        assert_eq!(parse_command("/laporan@KasBot", None), Some(Command::Report));
    }

    #[test]
    fn ignores_commands_addressed_to_other_bots() {
        assert_eq!(parse_command("/laporan@OtherBot", Some("KasBot")), None);
        assert_eq!(parse_command("/masuk@OtherBot 1000 Gaji", Some("KasBot")), None);
    }

    #[test]
    fn ignores_plain_text_and_unknown_commands() {
        assert_eq!(parse_command("halo", None), None);
        assert_eq!(parse_command("/transfer 10", None), None);
        assert_eq!(parse_command("", None), None);
        assert_eq!(parse_command("/Masuk 10 x", None), None);
    }

    #[test]
    fn collapses_whitespace_between_args() {
        assert_eq!(
            parse_command("/keluar  50000   Makan siang #makanan", None),
            Some(Command::Record(
                Kind::Expense,
                vec!["50000".into(), "Makan".into(), "siang".into(), "#makanan".into()]
            ))
        );
    }
}
