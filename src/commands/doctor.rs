// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{HEADER, RawRow, Transaction};
use crate::store::{Connect, LedgerStore};
use crate::utils::pretty_table;

pub fn handle<C: Connect>(connector: &C) -> Result<()> {
    let mut store = connector.connect()?;
    let rows = store.read_all()?;
    println!("Connected: {} data rows", rows.len());

    let issues = diagnose(&rows);
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Row", "Issue", "Detail"], issues));
    }
    Ok(())
}

/// One entry per problem row: sheet row number, issue code, detail.
pub fn diagnose(rows: &[RawRow]) -> Vec<Vec<String>> {
    let mut issues = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let sheet_row = (i + 2).to_string();
        match Transaction::from_row(row) {
            Err(e) => issues.push(vec![sheet_row, "malformed_row".into(), e.to_string()]),
            Ok(_) => {
                // hand-edited rows may leave description or category blank
                let filled = row.iter().take(HEADER.len()).filter(|c| !c.trim().is_empty()).count();
                if row.len() < HEADER.len() || filled < HEADER.len() {
                    issues.push(vec![
                        sheet_row,
                        "missing_field".into(),
                        format!("{} of {} columns filled", filled, HEADER.len()),
                    ]);
                }
            }
        }
    }
    issues
}
