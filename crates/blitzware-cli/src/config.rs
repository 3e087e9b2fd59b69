//! CLI state persisted between invocations.
//!
//! Stores the API URL, the logged-in session, a login parked on a
//! verification code, and the active application in
//! `~/.blitzware/session.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use blitzware_core::models::AccountData;
use blitzware_core::AuthChallenge;

/// Persistent CLI state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// API base URL the session belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Account and bearer token from the last successful login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<AccountData>,
    /// Login waiting for a verification code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingLogin>,
    /// Application used when a command gets no `--app`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_application: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub username: String,
    pub challenge: AuthChallenge,
}

impl CliConfig {
    /// Path to the state directory: `~/.blitzware/`.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".blitzware"))
    }

    /// Path to the state file: `~/.blitzware/session.json`.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("session.json"))
    }

    /// Load state from disk. Returns default if the file is missing or invalid.
    pub fn load() -> Self {
        Self::config_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save state to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path =
            Self::config_path().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Forget the session and any parked login.
    pub fn clear_auth(&mut self) {
        self.session = None;
        self.pending = None;
    }

    /// Whether the stored session was issued by `api_url`.
    pub fn matches_api(&self, api_url: &str) -> bool {
        self.api_url.as_deref() == Some(api_url)
    }

    /// `explicit`, else the active application.
    pub fn application<'a>(&'a self, explicit: Option<&'a str>) -> anyhow::Result<&'a str> {
        explicit
            .or(self.active_application.as_deref())
            .ok_or_else(|| {
                anyhow::anyhow!("No application selected. Pass --app <id> or run `app use <id>`")
            })
    }
}
