//! Vacances Scolaires Library
//!
//! Resolves French school holiday periods for metropolitan zones (A/B/C)
//! and DOM-TOM territories from the official open dataset, with a local
//! payload cache and a built-in static fallback so queries always have an
//! answer. "Today" is computed in each zone's own timezone, which matters
//! for overseas territories hours away from metropolitan midnight.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use app::{DataSource, Session, SessionOptions, VacationPeriod, Zone};
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(RECORD_LIMIT, 100);
        assert!(RECORDS_URL.contains("fr-en-calendrier-scolaire"));
        assert_eq!(VALIDITY_WINDOW.as_secs(), 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_error_types() {
        let config_error = errors::ConfigError::InvalidZone {
            zone: "X".to_string(),
            valid: "A, B, C".to_string(),
        };
        let app_error = AppError::Config(config_error);

        assert_eq!(app_error.category(), "config");
        assert!(!app_error.is_recoverable());
    }
}
