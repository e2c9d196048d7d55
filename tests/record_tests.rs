// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use kasbot::commands::record;
use kasbot::error::LedgerError;
use kasbot::models::{DEFAULT_CATEGORY, Kind, Transaction};
use kasbot::store::{MemoryStore, Op};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(12, 5, 9)
        .unwrap()
}

fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

#[test]
fn records_income_with_category() {
    let store = MemoryStore::with_header();
    let tx = record::record(&store, Kind::Income, &args("1000000 Gaji bulanan #gaji"), now()).unwrap();
    assert_eq!(tx.amount, 1000000);
    assert_eq!(tx.description, "Gaji bulanan");
    assert_eq!(tx.category, "gaji");

    let rows = store.snapshot();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        vec!["2026-10-16 12:05:09", "Pemasukan", "1000000", "Gaji bulanan", "gaji"]
    );
}

#[test]
fn no_marker_means_default_category_and_full_text() {
    let store = MemoryStore::with_header();
    for input in ["50000 Makan siang", "7 a b c d", "0 nol"] {
        let tx = record::record(&store, Kind::Expense, &args(input), now()).unwrap();
        let expected: Vec<&str> = input.split_whitespace().skip(1).collect();
        assert_eq!(tx.description, expected.join(" "));
        assert_eq!(tx.category, DEFAULT_CATEGORY);
    }
    for row in store.snapshot().iter().skip(1) {
        assert_eq!(row[4], DEFAULT_CATEGORY);
    }
}

#[test]
fn empty_marker_defaults_category() {
    let store = MemoryStore::with_header();
    for input in ["50000 Makan siang #", "50000 Makan siang #   "] {
        let tx = record::record(&store, Kind::Expense, &args(input), now()).unwrap();
        assert_eq!(tx.description, "Makan siang");
        assert_eq!(tx.category, DEFAULT_CATEGORY);
    }
}

#[test]
fn non_numeric_amount_is_rejected_without_write() {
    let store = MemoryStore::with_header();
    let err = record::record(&store, Kind::Income, &args("abc Gaji"), now()).unwrap_err();
    assert!(matches!(err, LedgerError::AmountFormat));
    let err = record::record(&store, Kind::Income, &args("-500 Gaji"), now()).unwrap_err();
    assert!(matches!(err, LedgerError::AmountFormat));
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn single_token_is_a_format_error() {
    let store = MemoryStore::with_header();
    let err = record::record(&store, Kind::Income, &args("1000"), now()).unwrap_err();
    assert!(matches!(err, LedgerError::Format));
    let err = record::record(&store, Kind::Income, &[], now()).unwrap_err();
    assert!(matches!(err, LedgerError::Format));
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn offline_store_reports_unavailable() {
    let store = MemoryStore::offline();
    let err = record::record(&store, Kind::Expense, &args("10 Parkir"), now()).unwrap_err();
    assert!(matches!(err, LedgerError::Unavailable));
}

#[test]
fn stored_row_decodes_back() {
    let store = MemoryStore::with_header();
    let tx = record::record(&store, Kind::Expense, &args("50000 Makan siang #Makanan"), now()).unwrap();
    let rows = store.snapshot();
    assert_eq!(Transaction::from_row(&rows[1]).unwrap(), tx);
}

#[test]
fn failed_append_is_a_write_error_and_leaves_rows() {
    let store = MemoryStore::with_header();
    store.push_raw(&["2026-10-01 08:00:00", "Pemasukan", "1000", "awal", "lainnya"]);
    let before = store.snapshot();

    let broken = store.failing(Op::Append);
    let err = record::record(&broken, Kind::Expense, &args("10 Parkir"), now()).unwrap_err();
    assert!(matches!(err, LedgerError::Write));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn category_only_input_is_rejected_without_write() {
    let store = MemoryStore::with_header();
    let err = record::record(&store, Kind::Income, &args("1000 #gaji"), now()).unwrap_err();
    assert!(matches!(err, LedgerError::Format));
    assert_eq!(store.snapshot().len(), 1);
}
