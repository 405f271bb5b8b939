//! `AppConfig` struct and TOML loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use marquee_api::catalog::{DEFAULT_BASE_URL, DEFAULT_MIN_VOTE_COUNT};
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Interactive UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Catalog API configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// TMDB API read access token. The `TMDB_API_TOKEN` environment variable
    /// takes precedence.
    pub api_token: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Response language.
    pub language: String,
    /// Minimum vote count for rating and popularity ordered discovery.
    pub min_vote_count: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: String::from(DEFAULT_BASE_URL),
            language: String::from("en-US"),
            min_vote_count: DEFAULT_MIN_VOTE_COUNT,
        }
    }
}

/// Interactive UI configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Search debounce quiet period in milliseconds.
    pub debounce_ms: u64,
    /// Redraw interval in milliseconds.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            tick_ms: 100,
        }
    }
}

impl UiConfig {
    /// Debounce quiet period.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Tick interval, at least 10 ms.
    #[must_use]
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}
