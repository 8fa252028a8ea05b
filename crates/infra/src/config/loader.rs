//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. When both required variables are set, the environment is
//!    authoritative; invalid values surface as errors
//! 2. Otherwise, falls back to loading from file
//! 3. Probes conventional paths for config files
//! 4. Supports TOML and JSON formats
//!
//! ## Environment Variables
//! - `TALLY_BASE_URL`: Tracker base URL (required)
//! - `TALLY_API_KEY`: API key (required)
//! - `TALLY_API_KEY_HEADER`: Header the key is sent under (optional)
//! - `TALLY_HTTP_TIMEOUT`: Request timeout in seconds (optional)
//! - `TALLY_HTTP_MAX_ATTEMPTS`: HTTP attempts per request (optional)
//! - `TALLY_TICK_INTERVAL`: Timer tick interval in seconds (optional)
//!
//! ## File Locations
//! The loader probes (in order): `./tally.toml`, `./tally.json`,
//! `./config.toml`, `./config.json`.

use std::path::{Path, PathBuf};

use tally_domain::{Result, TallyError};

use super::{ApiConfig, Config, TrackingConfig};

const PROBE_PATHS: [&str; 4] = ["tally.toml", "tally.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// When `TALLY_BASE_URL` and `TALLY_API_KEY` are both set the environment
/// is authoritative: an invalid optional variable is an error, not a
/// reason to consult a file. Only when a required variable is absent does
/// the loader fall back to file probing.
///
/// # Errors
/// Returns `TallyError::Config` if configuration cannot be loaded from
/// either source, or a file has an invalid format.
pub fn load() -> Result<Config> {
    if required_env_present() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        Ok(config)
    } else {
        tracing::debug!("Required environment variables not set, trying file");
        load_from_file(None)
    }
}

fn required_env_present() -> bool {
    std::env::var_os("TALLY_BASE_URL").is_some() && std::env::var_os("TALLY_API_KEY").is_some()
}

/// Load configuration from environment variables
///
/// `TALLY_BASE_URL` and `TALLY_API_KEY` are required; the remaining
/// variables fall back to defaults.
///
/// # Errors
/// Returns `TallyError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("TALLY_BASE_URL")?;
    let api_key = env_var("TALLY_API_KEY")?;
    let api_key_header =
        std::env::var("TALLY_API_KEY_HEADER").unwrap_or_else(|_| super::default_api_key_header());
    let timeout_secs = env_parse("TALLY_HTTP_TIMEOUT", super::default_timeout_secs())?;
    let max_attempts = env_parse("TALLY_HTTP_MAX_ATTEMPTS", super::default_max_attempts())?;
    let tick_interval_secs = env_parse("TALLY_TICK_INTERVAL", super::default_tick_interval_secs())?;

    validate(Config {
        api: ApiConfig { base_url, api_key, api_key_header, timeout_secs, max_attempts },
        tracking: TrackingConfig { tick_interval_secs },
    })
}

/// Load configuration from a file
///
/// When `path` is `None`, probes the conventional locations. Format is
/// chosen by extension: `.toml` or `.json`.
///
/// # Errors
/// Returns `TallyError::Config` if no file is found or parsing fails.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => probe_config_file()
            .ok_or_else(|| TallyError::Config("no configuration file found".to_string()))?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        TallyError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("invalid TOML in {}: {e}", path.display())))?,
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("invalid JSON in {}: {e}", path.display())))?,
        _ => {
            return Err(TallyError::Config(format!(
                "unsupported config format: {}",
                path.display()
            )))
        }
    };

    let config = validate(config)?;
    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

// a zero tick interval would leave a running session with a dead clock
fn validate(config: Config) -> Result<Config> {
    if config.tracking.tick_interval_secs == 0 {
        return Err(TallyError::Config("tick_interval_secs must be at least 1".to_string()));
    }
    Ok(config)
}

fn probe_config_file() -> Option<PathBuf> {
    PROBE_PATHS.into_iter().map(PathBuf::from).find(|p| p.is_file())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| TallyError::Config(format!("missing environment variable {name}")))
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| TallyError::Config(format!("invalid value for {name}: {e}"))),
        Err(_) => Ok(default),
    }
}
