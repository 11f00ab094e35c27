//! Configuration handling
//!
//! Reads `flightdesk.toml` from the configuration directory. Missing files
//! fall back to the defaults (local flight and booking services).
//!
//! ## Environment Variables
//!
//! - `FLIGHTDESK_FLIGHT_URL` - Flight record store endpoint
//! - `FLIGHTDESK_BOOKING_URL` - Booking record store endpoint
//! - `FLIGHTDESK_EXPORT_DIR` - Directory CSV exports are saved to
//! - `FLIGHTDESK_TIMEOUT_MS` - Transport timeout in milliseconds
//!
//! These can be set in a `.env` file in the configuration directory.

use flightdesk_client::{DEFAULT_BOOKING_URL, DEFAULT_FLIGHT_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "flightdesk.toml";

/// Environment variable names
pub const ENV_FLIGHT_URL: &str = "FLIGHTDESK_FLIGHT_URL";
pub const ENV_BOOKING_URL: &str = "FLIGHTDESK_BOOKING_URL";
pub const ENV_EXPORT_DIR: &str = "FLIGHTDESK_EXPORT_DIR";
pub const ENV_TIMEOUT_MS: &str = "FLIGHTDESK_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_flight_url")]
    pub flight_url: String,
    #[serde(default = "default_booking_url")]
    pub booking_url: String,
    /// Where exports are saved; the download directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Transport timeout; no timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_flight_url() -> String {
    DEFAULT_FLIGHT_URL.to_string()
}

fn default_booking_url() -> String {
    DEFAULT_BOOKING_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flight_url: default_flight_url(),
            booking_url: default_booking_url(),
            export_dir: None,
            timeout_ms: None,
        }
    }
}

impl Config {
    /// Load configuration from a directory
    ///
    /// Loads `.env` from the directory first, then the TOML file when it
    /// exists, then applies environment variable overrides.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let env_path = dir.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }

        let mut config = Self::from_file(dir)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads the TOML file only, without consulting the environment.
    pub fn from_file(dir: &Path) -> anyhow::Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config_path.display(), e))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`; empty or unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(url) = value(ENV_FLIGHT_URL) {
            self.flight_url = url;
        }
        if let Some(url) = value(ENV_BOOKING_URL) {
            self.booking_url = url;
        }
        if let Some(dir) = value(ENV_EXPORT_DIR) {
            self.export_dir = Some(PathBuf::from(dir));
        }
        if let Some(ms) = value(ENV_TIMEOUT_MS).and_then(|v| v.parse().ok()) {
            self.timeout_ms = Some(ms);
        }
    }

    pub fn save(&self, dir: &Path) -> anyhow::Result<()> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
