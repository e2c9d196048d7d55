// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{HEADER, RawRow};
use crate::store::{Connect, LedgerStore};
use crate::utils::pretty_table;

pub fn handle<C: Connect>(connector: &C, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied();
    let data = recent_rows(connector, limit)?;
    if data.is_empty() {
        println!("No rows stored yet.");
        return Ok(());
    }
    println!("{}", pretty_table(&HEADER, data));
    Ok(())
}

/// Stored rows, newest first, padded to the five sheet columns.
pub fn recent_rows<C: Connect>(connector: &C, limit: Option<usize>) -> Result<Vec<RawRow>> {
    let mut store = connector.connect()?;
    let rows = store.read_all()?;
    let take = limit.unwrap_or(rows.len());
    Ok(rows
        .into_iter()
        .rev()
        .take(take)
        .map(|mut r| {
            r.resize(HEADER.len(), String::new());
            r
        })
        .collect())
}
