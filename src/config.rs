//! Frontend Configuration
//!
//! Tunables read from `localStorage`, every field optional.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// `localStorage` key holding the JSON config object
pub const CONFIG_STORAGE_KEY: &str = "task-queue.config";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// How long the gateway waits for a backend answer
    pub command_timeout_ms: u64,
    /// How long an error toast stays on screen
    pub toast_duration_ms: u64,
    /// Rows per page on the completed/archived pages
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: 5000,
            toast_duration_ms: 3000,
            page_size: 20,
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let config: AppConfig = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    /// Load from `localStorage`, falling back to defaults
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(CONFIG_STORAGE_KEY).ok().flatten());

        match raw {
            None => AppConfig::default(),
            Some(raw) => match AppConfig::from_json(&raw) {
                Ok(config) => {
                    tracing::info!(
                        timeout_ms = config.command_timeout_ms,
                        toast_ms = config.toast_duration_ms,
                        page_size = config.page_size,
                        "loaded frontend config"
                    );
                    config
                }
                Err(error) => {
                    tracing::warn!(%error, "malformed frontend config; using defaults");
                    AppConfig::default()
                }
            },
        }
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    // Zero values would make every call time out or every page empty
    fn sanitized(mut self) -> Self {
        let defaults = AppConfig::default();
        if self.command_timeout_ms == 0 {
            self.command_timeout_ms = defaults.command_timeout_ms;
        }
        if self.page_size == 0 {
            self.page_size = defaults.page_size;
        }
        self
    }
}
