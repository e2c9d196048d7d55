// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row-append ledger stores.
//!
//! A [`Connect`] implementation hands out a fresh [`LedgerStore`] handle per
//! request; nothing is cached between requests, so every read reflects the
//! remote sheet as it is right now.

pub mod auth;
pub mod memory;
pub mod sheets;

use crate::error::StoreError;
use crate::models::{RawRow, Transaction};

pub use memory::{MemoryStore, Op};
pub use sheets::{SheetsConnector, SheetsStore};

pub trait LedgerStore {
    /// Add the transaction as a new trailing row.
    fn append(&mut self, tx: &Transaction) -> Result<(), StoreError>;

    /// Every data row in storage order, header excluded.
    fn read_all(&mut self) -> Result<Vec<RawRow>, StoreError>;

    /// Remove the physically last row and return what it held.
    /// Fails with [`StoreError::Empty`] when only the header is left.
    fn delete_last(&mut self) -> Result<RawRow, StoreError>;

    /// Write the header row into a sheet with no rows at all.
    /// Returns `false` when something was already there.
    fn ensure_header(&mut self) -> Result<bool, StoreError>;
}

pub trait Connect {
    type Store: LedgerStore;

    fn connect(&self) -> Result<Self::Store, StoreError>;
}
