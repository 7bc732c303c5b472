//! Error types for the vacances scolaires resolver
//!
//! This module defines error types for all components of the application.
//! The fetch pipeline is designed to degrade rather than fail: `FetchError`
//! and `CacheError` are consumed inside the pipeline and only ever surface
//! as a degraded data source, while `ConfigError` is fatal at construction.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
///
/// These are the only errors surfaced directly to the host: an invalid
/// (zone, academy) pair fails session construction immediately.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Zone is not one of the metropolitan zones or DOM-TOM territories
    #[error("Invalid zone '{zone}'. Must be one of: {valid}")]
    InvalidZone { zone: String, valid: String },

    /// Academy does not belong to the requested zone
    #[error("Invalid academy '{academy}' for zone {zone}. Must be one of: {valid}")]
    InvalidAcademy {
        academy: String,
        zone: String,
        valid: String,
    },

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration file")]
    InvalidFile(#[from] toml::de::Error),

    /// Configuration file not found at an explicitly requested path
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// I/O error reading the configuration file
    #[error("I/O error reading configuration")]
    Io(#[from] std::io::Error),
}

/// Transient network fetch errors
///
/// Never propagated out of the fetch pipeline; they trigger the
/// cache-then-static fallback chain instead.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error (includes connect failures and timeouts)
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("API returned status {status}")]
    Status { status: u16 },

    /// Response body was not valid JSON
    #[error("Failed to decode API response as JSON")]
    Decode(#[source] reqwest::Error),

    /// The records endpoint URL failed to parse
    #[error("Invalid API URL: {url}")]
    InvalidUrl { url: String },
}

/// Cache store errors
///
/// Always swallowed and logged at the call site: caching is an optimization,
/// never a correctness requirement.
#[derive(Error, Debug)]
pub enum CacheError {
    /// I/O error reading or writing a cache file
    #[error("Cache I/O error")]
    Io(#[from] std::io::Error),

    /// Cached payload was not valid JSON
    #[error("Corrupted cache file")]
    Corrupted(#[from] serde_json::Error),

    /// No cache file exists for this (zone, academy)
    #[error("No cache entry at {path}")]
    Miss { path: PathBuf },
}

/// Payload parsing errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Payload was not a JSON object
    #[error("API payload is not a JSON object")]
    NotAnObject,

    /// Payload has no `results` key
    #[error("API payload has no 'results' key")]
    MissingResults,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable inside the fetch pipeline
    ///
    /// Recoverable errors trigger the cache-then-static fallback; only
    /// configuration errors are fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Config(_))
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Fetch(_) => "fetch",
            AppError::Cache(_) => "cache",
            AppError::Parse(_) => "parse",
            AppError::Io(_) => "io",
            AppError::Json(_) => "json",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_fatal() {
        let err = AppError::Config(ConfigError::InvalidZone {
            zone: "Z".to_string(),
            valid: "A, B, C".to_string(),
        });
        assert!(!err.is_recoverable());
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_cache_errors_are_recoverable() {
        let err = AppError::Cache(CacheError::Miss {
            path: PathBuf::from("/tmp/missing.json"),
        });
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "cache");
    }

    #[test]
    fn test_invalid_zone_message_lists_valid_zones() {
        let err = ConfigError::InvalidZone {
            zone: "D".to_string(),
            valid: "A, B, C".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'D'"));
        assert!(msg.contains("A, B, C"));
    }
}
