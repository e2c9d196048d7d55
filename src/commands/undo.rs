// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::{error, info, warn};

use crate::error::{LedgerError, StoreError};
use crate::models::RawRow;
use crate::store::{Connect, LedgerStore};
use crate::utils::{escape_html, fmt_rupiah, parse_stored_amount};

/// Remove the physically last row and return what it held.
///
/// The store is read first: with no data rows the delete is never issued.
/// Another writer may append between the read and the delete; the row
/// reported is the one the store actually removed.
pub fn delete_last<C: Connect>(connector: &C) -> Result<RawRow, LedgerError> {
    let mut store = connector.connect().map_err(|e| {
        error!(op = "delete_last", "store unavailable: {}", e);
        LedgerError::Unavailable
    })?;
    let rows = store.read_all().map_err(|e| {
        error!(op = "delete_last", "read failed: {}", e);
        LedgerError::Read
    })?;
    let Some(seen) = rows.last().cloned() else {
        return Err(LedgerError::NothingToDelete);
    };

    let removed = store.delete_last().map_err(|e| match e {
        StoreError::Empty => LedgerError::NothingToDelete,
        other => {
            error!(op = "delete_last", rows = rows.len(), "delete failed: {}", other);
            LedgerError::Delete
        }
    })?;
    if removed != seen {
        warn!(?seen, ?removed, "last row changed between read and delete");
    }
    info!("Data terakhir dihapus: {:?}", removed);
    Ok(removed)
}

pub fn render(row: &RawRow) -> String {
    let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
    let amount = match parse_stored_amount(cell(2)) {
        Some(n) => fmt_rupiah(n as i128),
        None => escape_html(cell(2)),
    };
    format!(
        "🗑️ Data terakhir berhasil dihapus:\n\n<b>Jenis:</b> {}\n<b>Jumlah:</b> {}\n<b>Deskripsi:</b> {}",
        escape_html(cell(1)),
        amount,
        escape_html(cell(3)),
    )
}
