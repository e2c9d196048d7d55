// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{HEADER, RawRow, Transaction};
use crate::store::auth::{ServiceAccountKey, fetch_access_token};
use crate::store::{Connect, LedgerStore};
use crate::utils::http_client;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Opens the first worksheet of a spreadsheet looked up by name.
#[derive(Debug, Clone)]
pub struct SheetsConnector {
    pub credentials: PathBuf,
    pub sheet_name: String,
    pub timeout_secs: u64,
}

/// Authenticated handle on one worksheet.
#[derive(Debug)]
pub struct SheetsStore {
    client: Client,
    token: String,
    spreadsheet_id: String,
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
    #[serde(default)]
    index: i64,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsConnector {
    fn open(&self) -> Result<SheetsStore> {
        let key = ServiceAccountKey::from_file(&self.credentials)?;
        let client = http_client(self.timeout_secs)?;
        let token = fetch_access_token(&client, &key)?;
        let spreadsheet_id = find_spreadsheet(&client, &token, &self.sheet_name)?;

        let mut url = Url::parse(SHEETS_API)?;
        push_segment(&mut url, &spreadsheet_id)?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(sheetId,title,index)");
        let meta: Spreadsheet = send(client.get(url).bearer_auth(&token))?
            .json()
            .context("Malformed spreadsheet metadata")?;
        let first = meta
            .sheets
            .into_iter()
            .map(|s| s.properties)
            .min_by_key(|p| p.index)
            .ok_or_else(|| anyhow!("Spreadsheet '{}' has no worksheets", self.sheet_name))?;

        debug!(spreadsheet_id = %spreadsheet_id, sheet = %first.title, "opened worksheet");
        Ok(SheetsStore {
            client,
            token,
            spreadsheet_id,
            sheet_id: first.sheet_id,
            title: first.title,
        })
    }
}

impl Connect for SheetsConnector {
    type Store = SheetsStore;

    fn connect(&self) -> Result<SheetsStore, StoreError> {
        self.open()
            .map_err(|e| StoreError::Connection(format!("{:#}", e)))
    }
}

fn find_spreadsheet(client: &Client, token: &str, name: &str) -> Result<String> {
    let q = format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        name.replace('\\', "\\\\").replace('\'', "\\'"),
        SPREADSHEET_MIME
    );
    let list: FileList = send(
        client
            .get(DRIVE_FILES_API)
            .bearer_auth(token)
            .query(&[("q", q.as_str()), ("fields", "files(id)"), ("pageSize", "1")]),
    )?
    .json()
    .context("Malformed Drive file list")?;
    list.files
        .into_iter()
        .next()
        .map(|f| f.id)
        .ok_or_else(|| anyhow!("Spreadsheet '{}' not found or not shared with the service account", name))
}

fn push_segment(url: &mut Url, segment: &str) -> Result<()> {
    url.path_segments_mut()
        .map_err(|_| anyhow!("Cannot extend URL {}", SHEETS_API))?
        .push(segment);
    Ok(())
}

fn send(req: RequestBuilder) -> Result<Response> {
    let resp = req.send()?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(anyhow!("HTTP {}: {}", status, body));
    }
    Ok(resp)
}

fn cell_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetsStore {
    fn range(&self) -> String {
        format!("'{}'!A:E", self.title.replace('\'', "''"))
    }

    fn values_url(&self, suffix: &str) -> Result<Url> {
        let mut url = Url::parse(SHEETS_API)?;
        push_segment(&mut url, &self.spreadsheet_id)?;
        push_segment(&mut url, "values")?;
        push_segment(&mut url, &format!("{}{}", self.range(), suffix))?;
        Ok(url)
    }

    /// All rows including the header.
    fn values(&self) -> Result<Vec<RawRow>> {
        let mut url = self.values_url("")?;
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE")
            .append_pair("dateTimeRenderOption", "FORMATTED_STRING");
        let range: ValueRange = send(self.client.get(url).bearer_auth(&self.token))?
            .json()
            .context("Malformed value range")?;
        Ok(range
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    fn append_values(&self, row: Value) -> Result<()> {
        let mut url = self.values_url(":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        send(
            self.client
                .post(url)
                .bearer_auth(&self.token)
                .json(&json!({ "values": [row] })),
        )?;
        Ok(())
    }

    fn delete_row(&self, index: usize) -> Result<()> {
        let mut url = Url::parse(SHEETS_API)?;
        push_segment(&mut url, &format!("{}:batchUpdate", self.spreadsheet_id))?;
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.sheet_id,
                        "dimension": "ROWS",
                        "startIndex": index,
                        "endIndex": index + 1
                    }
                }
            }]
        });
        send(self.client.post(url).bearer_auth(&self.token).json(&body))?;
        Ok(())
    }
}

impl LedgerStore for SheetsStore {
    fn append(&mut self, tx: &Transaction) -> Result<(), StoreError> {
        let cells = tx.to_row();
        let row = json!([cells[0], cells[1], tx.amount, cells[3], cells[4]]);
        self.append_values(row)
            .map_err(|e| StoreError::Write(format!("{:#}", e)))
    }

    fn read_all(&mut self) -> Result<Vec<RawRow>, StoreError> {
        let rows = self
            .values()
            .map_err(|e| StoreError::Read(format!("{:#}", e)))?;
        Ok(rows.into_iter().skip(1).collect())
    }

    fn delete_last(&mut self) -> Result<RawRow, StoreError> {
        let mut rows = self
            .values()
            .map_err(|e| StoreError::Delete(format!("{:#}", e)))?;
        if rows.len() <= 1 {
            return Err(StoreError::Empty);
        }
        let index = rows.len() - 1;
        self.delete_row(index)
            .map_err(|e| StoreError::Delete(format!("{:#}", e)))?;
        rows.pop().ok_or(StoreError::Empty)
    }

    fn ensure_header(&mut self) -> Result<bool, StoreError> {
        let rows = self
            .values()
            .map_err(|e| StoreError::Read(format!("{:#}", e)))?;
        if !rows.is_empty() {
            return Ok(false);
        }
        self.append_values(json!(HEADER))
            .map_err(|e| StoreError::Write(format!("{:#}", e)))?;
        Ok(true)
    }
}
