//! Configuration management for the vacances scolaires CLI
//!
//! TOML-based configuration with standard-location discovery and
//! zero-config defaults. The library itself is configured through
//! [`SessionOptions`](crate::app::SessionOptions); this file-level layer
//! exists for the CLI and for hosts that want file-driven settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::{ClientConfig, SessionOptions};
use crate::constants::{api, refresh};
use crate::errors::{AppError, ConfigError, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Zone, academy and timezone selection
    pub holiday: HolidayConfig,
    /// Cache settings
    pub cache: CacheConfigToml,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Zone/academy selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayConfig {
    /// Zone label: "A", "B", "C" or a DOM-TOM territory name
    pub zone: String,
    /// Academy within the zone (empty = first declared academy)
    pub academy: Option<String>,
    /// IANA timezone override
    pub timezone: Option<String>,
    /// Days between scheduled refreshes
    pub update_interval_days: u64,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        Self {
            zone: "A".to_string(),
            academy: None,
            timezone: None,
            update_interval_days: refresh::DEFAULT_INTERVAL_DAYS,
        }
    }
}

/// TOML-friendly cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfigToml {
    /// Storage root for the cache directory (None = user cache directory)
    pub storage_root: Option<PathBuf>,
    /// Disable the payload cache entirely
    pub disabled: bool,
}

impl Default for CacheConfigToml {
    fn default() -> Self {
        Self {
            storage_root: None,
            disabled: false,
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Verify TLS certificates
    pub verify_tls: bool,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Records endpoint override (testing/mirrors)
    pub records_url: Option<String>,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            verify_tls: true,
            request_timeout_secs: api::REQUEST_TIMEOUT.as_secs(),
            records_url: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration, preferring an explicit path over the standard
    /// locations, and falling back to defaults when no file exists
    ///
    /// # Errors
    ///
    /// Fails if an explicitly specified file is missing or unparseable.
    pub async fn load(config_file_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(ConfigError::NotFound { path }));
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Find a configuration file in the standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut candidates = vec![PathBuf::from("./vacances-scolaires.toml")];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("vacances-scolaires").join("config.toml"));
        }
        for path in candidates {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }
        debug!("No config file found in standard locations");
        None
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Config(ConfigError::Io(e)))?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|e| AppError::Config(ConfigError::InvalidFile(e)))?;
        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Effective storage root: configured, or the user cache directory
    pub fn storage_root(&self) -> Option<PathBuf> {
        if self.cache.disabled {
            return None;
        }
        self.cache
            .storage_root
            .clone()
            .or_else(dirs::cache_dir)
    }

    /// Convert to session options for the configured zone
    pub fn to_session_options(&self) -> SessionOptions {
        let mut client = ClientConfig {
            verify_tls: self.client.verify_tls,
            request_timeout: Duration::from_secs(self.client.request_timeout_secs),
            ..Default::default()
        };
        if let Some(url) = &self.client.records_url {
            client.records_url = url.clone();
        }
        SessionOptions {
            zone: self.holiday.zone.clone(),
            academy: self.holiday.academy.clone(),
            storage_root: self.storage_root(),
            verify_tls: self.client.verify_tls,
            timezone: self.holiday.timezone.clone(),
            client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.holiday.zone, "A");
        assert_eq!(
            config.holiday.update_interval_days,
            refresh::DEFAULT_INTERVAL_DAYS
        );
        assert!(config.client.verify_tls);
        assert_eq!(config.logging.level, "info");
    }

    #[tokio::test]
    async fn test_missing_explicit_file_fails() {
        let tmp = TempDir::new().unwrap();
        let result = AppConfig::load(Some(tmp.path().join("nope.toml"))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let content = r#"
[holiday]
zone = "La Réunion"
timezone = "Indian/Reunion"
update_interval_days = 3

[cache]
disabled = true

[client]
verify_tls = false
request_timeout_secs = 5

[logging]
level = "debug"
"#;
        tokio::fs::write(&path, content).await.unwrap();

        let config = AppConfig::load(Some(path)).await.unwrap();
        assert_eq!(config.holiday.zone, "La Réunion");
        assert_eq!(config.holiday.update_interval_days, 3);
        assert!(!config.client.verify_tls);
        assert_eq!(config.logging.level, "debug");

        let options = config.to_session_options();
        assert!(options.storage_root.is_none());
        assert_eq!(options.timezone.as_deref(), Some("Indian/Reunion"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.holiday.zone, config.holiday.zone);
    }
}
