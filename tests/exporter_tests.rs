// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kasbot::commands::{doctor, exporter, rows};
use kasbot::store::MemoryStore;
use serde_json::json;
use tempfile::tempdir;

fn sample() -> MemoryStore {
    let store = MemoryStore::with_header();
    store.push_raw(&["2026-10-01 08:00:00", "Pemasukan", "1000000", "Gaji, bulanan", "gaji"]);
    store.push_raw(&["2026-10-02 12:30:00", "Pengeluaran", "50000", "Makan siang"]);
    store.push_raw(&["kemarin", "Pengeluaran", "20000", "Kopi", "jajan"]);
    store
}

#[test]
fn export_csv_pads_short_rows() {
    let store = sample();
    let dir = tempdir().unwrap();
    let out = dir.path().join("ledger.csv");

    let data = store.snapshot().into_iter().skip(1).collect::<Vec<_>>();
    exporter::write_rows(&data, "csv", &out).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Tanggal", "Jenis", "Jumlah", "Deskripsi", "Kategori"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][3], "Gaji, bulanan");
    assert_eq!(&records[1][4], "");
}

#[test]
fn export_json_keys_by_header() {
    let store = sample();
    let dir = tempdir().unwrap();
    let out = dir.path().join("ledger.json");

    let data = store.snapshot().into_iter().skip(1).collect::<Vec<_>>();
    exporter::write_rows(&data, "json", &out).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        written[0],
        json!({
            "Tanggal": "2026-10-01 08:00:00",
            "Jenis": "Pemasukan",
            "Jumlah": "1000000",
            "Deskripsi": "Gaji, bulanan",
            "Kategori": "gaji"
        })
    );
}

#[test]
fn unknown_format_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(exporter::write_rows(&[], "xlsx", &dir.path().join("x")).is_err());
}

#[test]
fn recent_rows_newest_first() {
    let store = sample();
    let recent = rows::recent_rows(&store, Some(2)).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0][3], "Kopi");
    assert_eq!(recent[1][4], "");
}

#[test]
fn doctor_flags_bad_and_incomplete_rows() {
    let store = sample();
    let data = store.snapshot().into_iter().skip(1).collect::<Vec<_>>();
    let issues = doctor::diagnose(&data);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0][0], "3");
    assert_eq!(issues[0][1], "missing_field");
    assert_eq!(issues[1][0], "4");
    assert_eq!(issues[1][1], "malformed_row");
}
