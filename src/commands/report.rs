// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDateTime};
use tracing::{error, warn};

use crate::error::{LedgerError, StoreError};
use crate::models::{Kind, RawRow, Transaction};
use crate::store::{Connect, LedgerStore};
use crate::utils::fmt_rupiah;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    /// e.g. `October 2026`
    pub month: String,
    pub total_income: i128,
    pub total_expense: i128,
    pub balance: i128,
    pub transactions: usize,
    /// Stored rows that could not be decoded and were left out.
    pub skipped: usize,
}

pub fn month_label(now: NaiveDateTime) -> String {
    now.format("%B %Y").to_string()
}

/// Sum the rows dated in the same calendar month and year as `now`.
/// Rows that fail to decode are skipped with a warning.
pub fn summarize(rows: &[RawRow], now: NaiveDateTime) -> Result<MonthlyReport, LedgerError> {
    if rows.is_empty() {
        return Err(LedgerError::NoData);
    }

    let mut skipped = 0;
    let mut this_month = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        match Transaction::from_row(row) {
            Ok(tx) => {
                if tx.timestamp.year() == now.year() && tx.timestamp.month() == now.month() {
                    this_month.push(tx);
                }
            }
            Err(e) => {
                // Header is row 1, so data row i sits at sheet row i + 2.
                warn!(sheet_row = i + 2, "skipping malformed row: {}", e);
                skipped += 1;
            }
        }
    }

    let month = month_label(now);
    if this_month.is_empty() {
        return Err(LedgerError::NoneThisMonth { month });
    }

    let total = |kind: Kind| -> i128 {
        this_month
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount as i128)
            .sum()
    };
    let total_income = total(Kind::Income);
    let total_expense = total(Kind::Expense);

    Ok(MonthlyReport {
        month,
        total_income,
        total_expense,
        balance: total_income - total_expense,
        transactions: this_month.len(),
        skipped,
    })
}

pub fn monthly_report<C: Connect>(
    connector: &C,
    now: NaiveDateTime,
) -> Result<MonthlyReport, LedgerError> {
    let mut store = connector.connect().map_err(|e| {
        error!(op = "read_all", "store unavailable: {}", e);
        LedgerError::Unavailable
    })?;
    let rows = store.read_all().map_err(|e| {
        error!(op = "read_all", "read failed: {}", e);
        match e {
            StoreError::Empty => LedgerError::NoData,
            _ => LedgerError::Read,
        }
    })?;
    summarize(&rows, now)
}

pub fn render(report: &MonthlyReport) -> String {
    let mut out = format!(
        "📊 <b>Laporan Keuangan - {}</b> 📊\n\n\
         🟢 <b>Total Pemasukan:</b> {}\n\
         🔴 <b>Total Pengeluaran:</b> {}\n\
         ----------------------------------\n\
         💰 <b>Saldo Bulan Ini:</b> {}\n",
        report.month,
        fmt_rupiah(report.total_income),
        fmt_rupiah(report.total_expense),
        fmt_rupiah(report.balance),
    );
    if report.skipped > 0 {
        out.push_str(&format!(
            "\n⚠️ {} baris tidak valid dilewati.\n",
            report.skipped
        ));
    }
    out
}
