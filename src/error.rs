// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised at the ledger store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot connect to store: {0}")]
    Connection(String),
    #[error("read failed: {0}")]
    Read(String),
    #[error("write failed: {0}")]
    Write(String),
    #[error("delete failed: {0}")]
    Delete(String),
    /// Only a header (or nothing at all) is left in the sheet.
    #[error("store has no data rows")]
    Empty,
}

/// Failures surfaced to the chat user. `Display` is the reply text.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Format salah. Contoh: `/masuk 500000 Gaji Pokok #gaji`")]
    Format,
    #[error("Jumlah harus berupa angka.")]
    AmountFormat,
    #[error("Gagal terhubung ke Google Sheets. Cek log server.")]
    Unavailable,
    #[error("Gagal mengambil data dari Google Sheets.")]
    Read,
    #[error("Gagal mencatat transaksi ke Google Sheets.")]
    Write,
    #[error("Gagal menghapus data terakhir.")]
    Delete,
    #[error("Tidak ada data untuk dihapus.")]
    NothingToDelete,
    #[error("Belum ada data keuangan yang tercatat.")]
    NoData,
    #[error("Tidak ada transaksi di bulan {month}.")]
    NoneThisMonth { month: String },
}

impl LedgerError {
    /// Informational outcomes that are not faults of the user or the store.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            LedgerError::NothingToDelete | LedgerError::NoData | LedgerError::NoneThisMonth { .. }
        )
    }
}

/// A stored row that does not decode into a transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("row has {0} columns, expected at least 3")]
    MissingField(usize),
    #[error("invalid timestamp '{0}'")]
    Timestamp(String),
    #[error("unknown kind '{0}'")]
    Kind(String),
    #[error("invalid amount '{0}'")]
    Amount(String),
}
