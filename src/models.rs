// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;

use crate::error::RowError;
use crate::utils::{parse_stored_amount, parse_timestamp};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_CATEGORY: &str = "Lainnya";
pub const HEADER: [&str; 5] = ["Tanggal", "Jenis", "Jumlah", "Deskripsi", "Kategori"];

/// A row exactly as the store returns it, header excluded.
pub type RawRow = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    /// Value written to the `Jenis` column.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Income => "Pemasukan",
            Kind::Expense => "Pengeluaran",
        }
    }

    pub fn from_label(s: &str) -> Option<Kind> {
        match s.trim() {
            "Pemasukan" => Some(Kind::Income),
            "Pengeluaran" => Some(Kind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub timestamp: NaiveDateTime,
    pub kind: Kind,
    pub amount: u64,
    pub description: String,
    pub category: String, // lowercase, never empty
}

impl Transaction {
    pub fn to_row(&self) -> RawRow {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.kind.label().to_string(),
            self.amount.to_string(),
            self.description.clone(),
            self.category.clone(),
        ]
    }

    /// Decode a stored row. The sheet drops trailing empty cells, so a row
    /// may arrive without description or category.
    pub fn from_row(row: &[String]) -> Result<Transaction, RowError> {
        if row.len() < 3 {
            return Err(RowError::MissingField(row.len()));
        }
        let timestamp =
            parse_timestamp(&row[0]).ok_or_else(|| RowError::Timestamp(row[0].clone()))?;
        let kind = Kind::from_label(&row[1]).ok_or_else(|| RowError::Kind(row[1].clone()))?;
        let amount = parse_stored_amount(&row[2]).ok_or_else(|| RowError::Amount(row[2].clone()))?;
        let description = row.get(3).map(|s| s.trim().to_string()).unwrap_or_default();
        let category = row
            .get(4)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        Ok(Transaction {
            timestamp,
            kind,
            amount,
            description,
            category,
        })
    }
}
