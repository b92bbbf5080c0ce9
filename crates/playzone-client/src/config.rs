//! # Client Configuration
//!
//! Where the API lives, how long to wait for it, and where session files go.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PLAYZONE_API_URL=https://api.playzone.id/api                       │
//! │     PLAYZONE_API_TIMEOUT_SECS=20                                       │
//! │     PLAYZONE_DATA_DIR=/var/lib/playzone                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/playzone/storefront.toml (Linux)                         │
//! │     ~/Library/Application Support/id.playzone.storefront/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000/api, 15s timeout, 30-day remember me         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [api]
//! base_url = "https://api.playzone.id/api"
//! timeout_secs = 15
//!
//! [session]
//! remember_days = 30
//! # data_dir = "/var/lib/playzone"
//!
//! [storefront]
//! currency_symbol = "Rp "
//! thousands_separator = "."
//! ```

use playzone_core::Money;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// File name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// API Settings
// =============================================================================

/// Where and how to reach the PlayZone API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Session persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// How long a remembered login stays valid when the server does not say.
    #[serde(default = "default_remember_days")]
    pub remember_days: u32,

    /// Directory for the session file and the saved restaurant cart.
    /// Falls back to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_remember_days() -> u32 {
    30
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            remember_days: default_remember_days(),
            data_dir: None,
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How prices are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
}

fn default_currency_symbol() -> String {
    "Rp ".to_string()
}

fn default_thousands_separator() -> char {
    '.'
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        StorefrontSettings {
            currency_symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

impl StorefrontSettings {
    /// Renders `amount` with the configured symbol and separator.
    pub fn format_price(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, self.thousands_separator)
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub storefront: StorefrontSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config pointing at `base_url` with every other setting defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into();
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if !(1..=365).contains(&self.session.remember_days) {
            return Err(ClientError::InvalidConfig(
                "remember_days must be between 1 and 365".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PLAYZONE_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(timeout) = std::env::var("PLAYZONE_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric PLAYZONE_API_TIMEOUT_SECS"),
            }
        }

        if let Ok(dir) = std::env::var("PLAYZONE_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.session.data_dir = Some(PathBuf::from(dir));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("id", "playzone", "storefront")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    /// Directory holding the session file and saved cart.
    pub fn data_dir(&self) -> ClientResult<PathBuf> {
        if let Some(dir) = &self.session.data_dir {
            return Ok(dir.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ClientError::InvalidConfig("No data directory available".into()))
    }

    /// How long a remembered login lasts when the server omits an expiry.
    pub fn remember_for(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.session.remember_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.session.remember_days, 30);
        assert_eq!(config.storefront.thousands_separator, '.');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "ftp://files.playzone.id".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "https://api.playzone.id/api".to_string();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.api.timeout_secs = 10;
        config.session.remember_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.playzone.id/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.playzone.id/api");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.storefront.currency_symbol, "Rp ");
    }

    #[test]
    fn test_prices_follow_display_settings() {
        let config = ClientConfig::default();
        let total = Money::from_rupiah(1_250_000);
        assert_eq!(config.storefront.format_price(total), total.to_string());

        let config: ClientConfig = toml::from_str(
            r#"
            [storefront]
            currency_symbol = "IDR "
            thousands_separator = ","
            "#,
        )
        .unwrap();
        assert_eq!(config.storefront.format_price(total), "IDR 1,250,000");
        assert_eq!(
            config.storefront.format_price(Money::from_rupiah(-7_500)),
            "-IDR 7,500"
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = ClientConfig::with_base_url("https://staging.playzone.id/api");
        config.session.remember_days = 7;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[session]"));

        let loaded: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let mut config = ClientConfig::default();
        config.session.data_dir = Some(PathBuf::from("/tmp/playzone-test"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/playzone-test"));
        assert_eq!(config.remember_for(), chrono::Duration::days(30));
    }
}
