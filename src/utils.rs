// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;

const UA: &str = concat!("kasbot/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Stored timestamps are written as `YYYY-MM-DD HH:MM:SS`; hand-edited
/// rows may carry only minutes or only a date.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Amount typed by the user: a plain non-negative integer.
pub fn parse_amount(s: &str) -> Option<u64> {
    s.parse::<u64>().ok()
}

/// Amount read back from the sheet. Unformatted numbers may come back as
/// `1000000.0`, which is still a whole amount.
pub fn parse_stored_amount(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// `1234567` -> `1,234,567`
pub fn thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

pub fn fmt_rupiah(n: i128) -> String {
    format!("Rp {}", thousands(n))
}

/// Upper-case the first character, lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());

/// Turn an HTML reply into plain terminal text.
pub fn strip_html(s: &str) -> String {
    TAG.replace_all(s, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(950000), "950,000");
        assert_eq!(thousands(1000000), "1,000,000");
        assert_eq!(thousands(-50000), "-50,000");
        assert_eq!(fmt_rupiah(1234567), "Rp 1,234,567");
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("1000"), Some(1000));
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("1.5"), None);
        assert_eq!(parse_stored_amount("1000000.0"), Some(1000000));
        assert_eq!(parse_stored_amount(" 42 "), Some(42));
        assert_eq!(parse_stored_amount("1.5"), None);
        assert_eq!(parse_stored_amount(""), None);
    }

    #[test]
    fn timestamps() {
        let ts = parse_timestamp("2026-10-01 00:00:00").unwrap();
        assert_eq!(ts.to_string(), "2026-10-01 00:00:00");
        assert!(parse_timestamp("2026-10-01").is_some());
        assert!(parse_timestamp("2026-10-01 07:15").is_some());
        assert!(parse_timestamp("01/10/2026").is_none());
    }

    #[test]
    fn text_helpers() {
        assert_eq!(capitalize("makanan"), "Makanan");
        assert_eq!(capitalize(""), "");
        assert_eq!(escape_html("a<b> & \"c\""), "a&lt;b&gt; &amp; &quot;c&quot;");
        assert_eq!(strip_html("<b>Jenis:</b> a&amp;b"), "Jenis: a&b");
    }
}
