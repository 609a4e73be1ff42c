//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Realtime database the site has always written to
pub const DEFAULT_DATABASE_URL: &str = "https://rajaram-a0aac-default-rtdb.firebaseio.com";
/// Collection receiving trail registrations and invite requests
pub const DEFAULT_COLLECTION: &str = "labyrinth_invites";

const DEFAULT_REVEAL_INTERVAL_MS: u64 = 50;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Realtime database base URL
    pub database_url: Option<String>,
    /// Database auth token appended as `?auth=`
    pub auth_token: Option<String>,
    /// Collection for trail registrations
    pub trail_collection: Option<String>,
    /// Collection for invite requests
    pub invite_collection: Option<String>,
    /// Delay between revealed prompt characters, 0 disables the reveal
    pub reveal_interval_ms: Option<u64>,
    /// Timeout for a single append request
    pub request_timeout_secs: Option<u64>,
    /// Go straight to the landing menu
    pub skip_splash: Option<bool>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "osspts", "labyrinth-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Override fields from `LABYRINTH_*` environment variables
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("LABYRINTH_DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(token) = lookup("LABYRINTH_AUTH_TOKEN").filter(|v| !v.is_empty()) {
            self.auth_token = Some(token);
        }
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    pub fn auth_token(&self) -> Option<String> {
        self.auth_token.clone()
    }

    pub fn trail_collection(&self) -> String {
        self.trail_collection
            .clone()
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string())
    }

    pub fn invite_collection(&self) -> String {
        self.invite_collection
            .clone()
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string())
    }

    /// Reveal interval, `None` when the reveal is disabled
    pub fn reveal_interval(&self) -> Option<Duration> {
        match self.reveal_interval_ms.unwrap_or(DEFAULT_REVEAL_INTERVAL_MS) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn skip_splash(&self) -> bool {
        self.skip_splash.unwrap_or(false)
    }
}
