// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::error::{LedgerError, StoreError};
use crate::models::{DEFAULT_CATEGORY, Kind, Transaction};
use crate::store::{Connect, LedgerStore};
use crate::utils::{capitalize, escape_html, fmt_rupiah, parse_amount};

/// Build a transaction from the tokens following `/masuk` or `/keluar`:
/// `<amount> <description...> [#category]`.
pub fn parse(kind: Kind, args: &[String], now: NaiveDateTime) -> Result<Transaction, LedgerError> {
    if args.len() < 2 {
        return Err(LedgerError::Format);
    }
    let amount = parse_amount(&args[0]).ok_or(LedgerError::AmountFormat)?;
    let text = args[1..].join(" ");

    let (description, category) = match text.split_once('#') {
        Some((desc, cat)) => {
            let cat = cat.trim().to_lowercase();
            let cat = if cat.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                cat
            };
            (desc.trim().to_string(), cat)
        }
        None => (text, DEFAULT_CATEGORY.to_string()),
    };
    // `/masuk 1000 #gaji` has two tokens but nothing to describe the entry
    if description.is_empty() {
        return Err(LedgerError::Format);
    }

    Ok(Transaction {
        timestamp: now,
        kind,
        amount,
        description,
        category,
    })
}

/// Parse and append. Nothing is written when parsing fails.
pub fn record<C: Connect>(
    connector: &C,
    kind: Kind,
    args: &[String],
    now: NaiveDateTime,
) -> Result<Transaction, LedgerError> {
    let tx = parse(kind, args, now)?;
    let mut store = connector.connect().map_err(|e| {
        error!(op = "append", kind = kind.label(), amount = tx.amount, "store unavailable: {}", e);
        LedgerError::Unavailable
    })?;
    store.append(&tx).map_err(|e| {
        error!(op = "append", kind = kind.label(), amount = tx.amount, "append failed: {}", e);
        match e {
            StoreError::Connection(_) => LedgerError::Unavailable,
            _ => LedgerError::Write,
        }
    })?;
    info!("Mencatat {}: {} - {}", kind.label(), tx.amount, tx.description);
    Ok(tx)
}

pub fn render(tx: &Transaction) -> String {
    format!(
        "✅ Berhasil dicatat!\n\n<b>Jenis:</b> {}\n<b>Jumlah:</b> {}\n<b>Deskripsi:</b> {}\n<b>Kategori:</b> {}",
        tx.kind.label(),
        fmt_rupiah(tx.amount as i128),
        escape_html(&tx.description),
        escape_html(&capitalize(&tx.category)),
    )
}
