// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::store::SheetsConnector;

// ProjectDirs qualifier, organization, application
const APP: (&str, &str, &str) = ("id.kasbot", "Kasbot", "kasbot");

pub const DEFAULT_SHEET_NAME: &str = "Data Keuangan Bot";
pub const DEFAULT_CREDENTIALS: &str = "credentials.json";
const HTTP_TIMEOUT_SECS: u64 = 15;

/// Resolved runtime settings. Nothing here is checked until the value is
/// actually used: credentials at connect time, the bot token at start.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bot_token: Option<String>,
    pub sheet_name: String,
    pub credentials: PathBuf,
}

impl Settings {
    pub fn from_matches(m: &clap::ArgMatches) -> Self {
        let sheet_name = m
            .get_one::<String>("sheet")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        let credentials = m
            .get_one::<String>("credentials")
            .map(PathBuf::from)
            .unwrap_or_else(default_credentials);
        Self {
            bot_token: m.get_one::<String>("token").cloned(),
            sheet_name,
            credentials,
        }
    }

    pub fn connector(&self) -> SheetsConnector {
        SheetsConnector {
            credentials: self.credentials.clone(),
            sheet_name: self.sheet_name.clone(),
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

/// `credentials.json` in the working directory, else in the platform
/// config dir.
pub fn default_credentials() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CREDENTIALS);
    if local.exists() {
        return local;
    }
    match ProjectDirs::from(APP.0, APP.1, APP.2) {
        Some(proj) => {
            let candidate = proj.config_dir().join(DEFAULT_CREDENTIALS);
            if candidate.exists() { candidate } else { local }
        }
        None => local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_credentials_always_names_the_key_file() {
        assert!(default_credentials().ends_with(DEFAULT_CREDENTIALS));
    }

    #[test]
    fn project_dirs_are_kasbot_owned() {
        assert_eq!(APP.2, "kasbot");
        if let Some(proj) = ProjectDirs::from(APP.0, APP.1, APP.2) {
            assert!(proj.config_dir().to_string_lossy().to_lowercase().contains("kasbot"));
        }
    }
}
