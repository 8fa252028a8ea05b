//! Application configuration

pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::load;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// Tracker API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the tracker, e.g. `https://tracker.example.com`.
    pub base_url: String,
    /// API key attached to every request.
    pub api_key: String,
    /// Header the API key is sent under.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total HTTP attempts per request.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

/// Tracking timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Seconds between timer ticks.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
}

impl TrackingConfig {
    /// Tick interval as a [`std::time::Duration`], for
    /// `TimeTracker::with_tick_interval`.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tick_interval_secs)
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { tick_interval_secs: default_tick_interval_secs() }
    }
}

fn default_api_key_header() -> String {
    "X-Api-Key".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_attempts() -> usize {
    1
}

const fn default_tick_interval_secs() -> u64 {
    1
}
