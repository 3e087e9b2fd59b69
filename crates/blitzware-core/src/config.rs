//! Configuration resolution for `BlitzWare`.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/blitzware/settings.json)
//! 3. Environment variables
//! 4. CLI arguments (highest priority, applied by the binary)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default API root. Every endpoint path is appended to it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/api";

/// Default value of the client-identifier header.
pub const DEFAULT_CLIENT_ID: &str = "blitzware-rs";

/// Complete `BlitzWare` configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Connection settings for the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent on every request in the client-identifier header.
    pub client_id: String,
    /// Overall request timeout. `None` keeps the HTTP stack's default.
    pub timeout_secs: Option<u64>,
    /// How many finished requests the tracker remembers.
    pub tracked_requests: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            timeout_secs: None,
            tracked_requests: 64,
        }
    }
}

/// Load configuration with hierarchical resolution.
///
/// `explicit` replaces the global config file when given; unlike the global
/// file it must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    match explicit {
        Some(path) => {
            let file = load_config_file(path)?;
            merge_config(&mut config, file);
        }
        None => {
            if let Some(global_path) = global_config_path() {
                if global_path.exists() {
                    let global = load_config_file(&global_path)?;
                    merge_config(&mut config, global);
                }
            }
        }
    }

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".blitzware").join("settings.json"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support/blitzware/settings.json"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("blitzware").join("settings.json"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_config(base: &mut Config, overlay: Config) {
    base.api.base_url = overlay.api.base_url;
    base.api.client_id = overlay.api.client_id;
    if overlay.api.timeout_secs.is_some() {
        base.api.timeout_secs = overlay.api.timeout_secs;
    }
    base.api.tracked_requests = overlay.api.tracked_requests;
    base.log_level = overlay.log_level;
}

/// Apply `BLITZWARE_*` overrides read through `lookup`.
///
/// Unparseable numeric values are ignored, keeping the previous layer.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("BLITZWARE_API_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = lookup("BLITZWARE_CLIENT_ID") {
        config.api.client_id = val;
    }
    if let Some(val) = lookup("BLITZWARE_TIMEOUT_SECS") {
        if let Ok(n) = val.parse() {
            config.api.timeout_secs = Some(n);
        }
    }
    if let Some(val) = lookup("BLITZWARE_LOG_LEVEL") {
        config.log_level = val;
    }
}
