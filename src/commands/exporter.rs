// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Result, bail};
use serde_json::{Map, Value};

use crate::models::{HEADER, RawRow};
use crate::store::{Connect, LedgerStore};

pub fn handle<C: Connect>(connector: &C, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let Some(out) = sub.get_one::<String>("out") else {
        bail!("--out is required");
    };

    let mut store = connector.connect()?;
    let rows = store.read_all()?;
    write_rows(&rows, &fmt, Path::new(out))?;
    println!("Exported {} rows to {}", rows.len(), out);
    Ok(())
}

/// Write rows in sheet order, keyed by the sheet header.
pub fn write_rows(rows: &[RawRow], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(HEADER)?;
            for row in rows {
                let mut cells = row.clone();
                cells.resize(HEADER.len(), String::new());
                wtr.write_record(&cells)?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<Value> = rows
                .iter()
                .map(|row| {
                    let mut obj = Map::new();
                    for (i, h) in HEADER.iter().enumerate() {
                        let cell = row.get(i).cloned().unwrap_or_default();
                        obj.insert(h.to_string(), Value::String(cell));
                    }
                    Value::Object(obj)
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
