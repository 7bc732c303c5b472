//! Prelude module
//!
//! Re-exports the most commonly used items so host integrations can pull
//! in everything they need with a single
//! `use vacances_scolaires::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vacances_scolaires::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = Session::new(SessionOptions::new("A"))?;
//!     let fetched = session.refresh().await;
//!     println!("on vacation: {} (live data: {})", session.is_on_vacation().await, fetched);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, ConfigError, Result};

// Essential app components
pub use crate::app::{
    CacheConfig, CacheStore, ClientConfig, DataSource, HolidayEngine, Session, SessionOptions,
    VacationPeriod, Zone, ALL_ZONES,
};

// File-level configuration for CLI-style hosts
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{RECORDS_URL, RECORD_LIMIT, USER_AGENT, VALIDITY_WINDOW};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        let _client_config = ClientConfig::default();
        let _app_config = AppConfig::default();
        assert_eq!(ALL_ZONES.len(), 12);
        assert!(USER_AGENT.contains("vacances-scolaires"));
    }

    #[test]
    fn test_session_construction_via_prelude() {
        let session = Session::new(SessionOptions::new("C")).unwrap();
        assert_eq!(session.zone(), Zone::C);
    }
}
