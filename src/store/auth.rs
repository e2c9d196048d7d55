// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Google service-account authentication (OAuth 2.0 JWT bearer grant).

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Credentials file '{}' not found", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid service-account JSON in '{}'", path.display()))
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Signed assertion for the token endpoint.
pub fn assertion(key: &ServiceAccountKey, issued_at: i64) -> Result<String> {
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPES.join(" "),
        aud: &key.token_uri,
        iat: issued_at,
        exp: issued_at + LIFETIME_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();
    let signing = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("Service-account private key is not a valid RSA PEM")?;
    jsonwebtoken::encode(&header, &claims, &signing).context("Failed to sign token assertion")
}

/// Exchange the service-account key for a short-lived access token.
pub fn fetch_access_token(
    client: &reqwest::blocking::Client,
    key: &ServiceAccountKey,
) -> Result<String> {
    let jwt = assertion(key, chrono::Utc::now().timestamp())?;
    let resp = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER), ("assertion", jwt.as_str())])
        .send()
        .context("Token endpoint unreachable")?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(anyhow!("Token request rejected ({}): {}", status, body));
    }
    let token: TokenResponse = resp.json().context("Malformed token response")?;
    Ok(token.access_token)
}
