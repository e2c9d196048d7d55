// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use kasbot::commands::{Command, Sender, dispatch, parse_command};
use kasbot::models::Kind;
use kasbot::store::MemoryStore;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn run(store: &MemoryStore, text: &str) -> kasbot::commands::Reply {
    let command = parse_command(text, None).expect("known command");
    dispatch(store, &command, None, now())
}

#[test]
fn parses_grammar() {
    assert_eq!(parse_command("/start", None), Some(Command::Help));
    assert_eq!(parse_command("/laporan", None), Some(Command::Report));
    assert_eq!(parse_command("/hapus_terakhir", None), Some(Command::DeleteLast));
    assert_eq!(
        parse_command("/masuk 1000 Gaji", None),
        Some(Command::Record(Kind::Income, vec!["1000".into(), "Gaji".into()]))
    );
}

#[test]
fn full_conversation() {
    let store = MemoryStore::with_header();

    let reply = run(&store, "/masuk 1000000 Gaji bulanan #gaji");
    assert!(reply.html);
    assert!(reply.text.starts_with("✅ Berhasil dicatat!"));
    assert!(reply.text.contains("<b>Kategori:</b> Gaji"));

    run(&store, "/keluar 50000 Makan siang #makanan");
    let reply = run(&store, "/laporan");
    assert!(reply.text.contains("Rp 950,000"));

    let reply = run(&store, "/hapus_terakhir");
    assert!(reply.text.contains("Makan siang"));
    let reply = run(&store, "/laporan");
    assert!(reply.text.contains("<b>Saldo Bulan Ini:</b> Rp 1,000,000"));
}

#[test]
fn failures_become_plain_text() {
    let store = MemoryStore::with_header();

    let reply = run(&store, "/masuk abc Gaji");
    assert!(!reply.html);
    assert_eq!(reply.text, "Jumlah harus berupa angka.");

    let reply = run(&store, "/masuk 1000");
    assert!(reply.text.starts_with("Format salah."));

    let reply = run(&store, "/hapus_terakhir");
    assert_eq!(reply.text, "Tidak ada data untuk dihapus.");

    let reply = run(&store, "/laporan");
    assert_eq!(reply.text, "Belum ada data keuangan yang tercatat.");

    assert_eq!(store.snapshot().len(), 1);

    let reply = run(&MemoryStore::offline(), "/keluar 10 Parkir");
    assert_eq!(reply.text, "Gagal terhubung ke Google Sheets. Cek log server.");
}

#[test]
fn help_mentions_sender() {
    let store = MemoryStore::with_header();
    let sender = Sender {
        id: 99,
        first_name: "Rina & Co".into(),
    };
    let reply = dispatch(&store, &Command::Help, Some(&sender), now());
    assert!(reply.html);
    assert!(reply.text.starts_with("Halo <a href=\"tg://user?id=99\">Rina &amp; Co</a>!"));
    assert!(reply.text.contains("/hapus_terakhir"));
}
