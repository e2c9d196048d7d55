// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::models::{HEADER, RawRow, Transaction};
use crate::store::{Connect, LedgerStore};

/// Store operation that can be made to fail after a good connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Append,
    ReadAll,
    DeleteLast,
}

/// Sheet kept in process memory. Clones share the same rows, so a clone
/// handed out by [`Connect::connect`] sees every write made through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<RawRow>>>,
    delete_calls: Arc<AtomicUsize>,
    offline: bool,
    failing: Option<Op>,
    // appended by another writer just before the next delete lands
    interleaved: Arc<Mutex<Option<RawRow>>>,
}

impl MemoryStore {
    /// A sheet holding only the header row.
    pub fn with_header() -> Self {
        let store = Self::default();
        store.lock().push(HEADER.iter().map(|h| h.to_string()).collect());
        store
    }

    /// A store whose every `connect` fails.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Same rows, but `op` fails with its store error on every call.
    pub fn failing(&self, op: Op) -> Self {
        Self {
            failing: Some(op),
            ..self.clone()
        }
    }

    /// Simulate a concurrent writer: `row` is appended right before the
    /// next `delete_last` takes effect.
    pub fn interleave_before_delete(&self, row: &[&str]) {
        let mut slot = self.interleaved.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(row.iter().map(|s| s.to_string()).collect());
    }

    /// Insert a raw row, bypassing validation. Used to simulate
    /// hand-edited sheet data.
    pub fn push_raw(&self, row: &[&str]) {
        self.lock().push(row.iter().map(|s| s.to_string()).collect());
    }

    /// All rows including the header.
    pub fn snapshot(&self) -> Vec<RawRow> {
        self.lock().clone()
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RawRow>> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LedgerStore for MemoryStore {
    fn append(&mut self, tx: &Transaction) -> Result<(), StoreError> {
        if self.failing == Some(Op::Append) {
            return Err(StoreError::Write("append rejected".into()));
        }
        self.lock().push(tx.to_row());
        Ok(())
    }

    fn read_all(&mut self) -> Result<Vec<RawRow>, StoreError> {
        if self.failing == Some(Op::ReadAll) {
            return Err(StoreError::Read("read rejected".into()));
        }
        Ok(self.lock().iter().skip(1).cloned().collect())
    }

    fn delete_last(&mut self) -> Result<RawRow, StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(Op::DeleteLast) {
            return Err(StoreError::Delete("delete rejected".into()));
        }
        let intruder = self
            .interleaved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        let mut rows = self.lock();
        if let Some(row) = intruder {
            rows.push(row);
        }
        if rows.len() <= 1 {
            return Err(StoreError::Empty);
        }
        rows.pop().ok_or(StoreError::Empty)
    }

    fn ensure_header(&mut self) -> Result<bool, StoreError> {
        let mut rows = self.lock();
        if !rows.is_empty() {
            return Ok(false);
        }
        rows.push(HEADER.iter().map(|h| h.to_string()).collect());
        Ok(true)
    }
}

impl Connect for MemoryStore {
    type Store = MemoryStore;

    fn connect(&self) -> Result<MemoryStore, StoreError> {
        if self.offline {
            return Err(StoreError::Connection("memory store is offline".into()));
        }
        Ok(self.clone())
    }
}
