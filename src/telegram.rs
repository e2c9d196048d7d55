// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Telegram Bot API transport: long-poll for messages, route commands,
//! send the replies back.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::commands::{Reply, Sender, dispatch, parse_command};
use crate::store::Connect;
use crate::utils::http_client;

const API: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 30;
const RETRY_PAUSE: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

pub struct Bot {
    client: reqwest::blocking::Client,
    api: String,
    token: String,
}

impl Bot {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_api_base(API, token)
    }

    /// Talk to a Bot API server other than api.telegram.org.
    pub fn with_api_base(api: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(anyhow!("Bot token is empty; set BOT_TOKEN or --token"));
        }
        Ok(Self {
            // Long polls hold the request open for POLL_TIMEOUT_SECS.
            client: http_client(POLL_TIMEOUT_SECS + 10)?,
            api: api.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api, self.token, method)
    }

    // The token is part of the URL, so reqwest errors lose theirs before
    // they reach a log line.
    fn call<T: serde::de::DeserializeOwned>(&self, method: &str, body: serde_json::Value) -> Result<T> {
        let resp: ApiResponse<T> = self
            .client
            .post(self.url(method))
            .json(&body)
            .send()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Telegram {} request failed", method))?
            .json()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Malformed Telegram {} response", method))?;
        if !resp.ok {
            return Err(anyhow!(
                "Telegram {} rejected: {}",
                method,
                resp.description.unwrap_or_default()
            ));
        }
        resp.result
            .ok_or_else(|| anyhow!("Telegram {} returned no result", method))
    }

    pub fn get_me(&self) -> Result<User> {
        self.call("getMe", json!({}))
    }

    pub fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": POLL_TIMEOUT_SECS,
                "allowed_updates": ["message"]
            }),
        )
    }

    pub fn send(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let mut body = json!({ "chat_id": chat_id, "text": reply.text });
        if reply.html {
            body["parse_mode"] = json!("HTML");
        }
        let _: serde_json::Value = self.call("sendMessage", body)?;
        Ok(())
    }

    /// Poll forever. Messages are handled one at a time in arrival order.
    pub fn run<C: Connect>(&self, connector: &C) -> Result<()> {
        let me = self.get_me().context("Bot token rejected by Telegram")?;
        info!(username = me.username.as_deref().unwrap_or(""), "Bot mulai berjalan...");
        let mut offset = 0;
        loop {
            let updates = match self.get_updates(offset) {
                Ok(u) => u,
                Err(e) => {
                    error!("polling failed: {:#}", e);
                    std::thread::sleep(RETRY_PAUSE);
                    continue;
                }
            };
            for update in updates {
                offset = offset.max(update.update_id + 1);
                if let Some(msg) = update.message {
                    self.handle_message(connector, me.username.as_deref(), msg);
                }
            }
        }
    }

    fn handle_message<C: Connect>(&self, connector: &C, username: Option<&str>, msg: Message) {
        let Some(text) = msg.text.as_deref() else {
            return;
        };
        let Some(command) = parse_command(text, username) else {
            debug!(chat_id = msg.chat.id, "ignoring message not addressed to this bot");
            return;
        };
        let sender = msg.from.map(|u| Sender {
            id: u.id,
            first_name: u.first_name,
        });
        info!(chat_id = msg.chat.id, command = command.name(), "received command");
        let reply = dispatch(connector, &command, sender.as_ref(), Local::now().naive_local());
        if let Err(e) = self.send(msg.chat.id, &reply) {
            error!(chat_id = msg.chat.id, command = command.name(), "reply failed: {:#}", e);
        }
    }
}
