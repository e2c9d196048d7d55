// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::Sender;
use crate::utils::escape_html;

const USAGE: &str = "Saya adalah bot pencatat keuangan pribadi Anda yang terintegrasi dengan Google Sheets.\n\n\
<b>PERINTAH YANG TERSEDIA:</b>\n\
📈 <b>/masuk</b> <code>JUMLAH DESKRIPSI #KATEGORI</code>\n   \
(Contoh: <code>/masuk 1000000 Gaji bulanan #gaji</code>)\n\n\
📉 <b>/keluar</b> <code>JUMLAH DESKRIPSI #KATEGORI</code>\n   \
(Contoh: <code>/keluar 50000 Makan siang #makanan</code>)\n\n\
📊 <b>/laporan</b> - Ringkasan keuangan bulan ini.\n\n\
🗑️ <b>/hapus_terakhir</b> - Menghapus data terakhir yang Anda masukkan.\n";

pub fn usage(sender: Option<&Sender>) -> String {
    let greeting = match sender {
        Some(s) => format!(
            "Halo <a href=\"tg://user?id={}\">{}</a>! 👋",
            s.id,
            escape_html(&s.first_name)
        ),
        None => "Halo! 👋".to_string(),
    };
    format!("{}\n\n{}", greeting, USAGE)
}
