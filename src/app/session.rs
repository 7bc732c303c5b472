//! Host-facing session for one (zone, academy) configuration
//!
//! The narrow interface the presentation layer talks to: a validated
//! constructor, an async refresh entry point returning a success flag, and
//! read-only accessors over the current query engine state. Each session is
//! independent; hosts schedule `refresh()` at their own cadence (the
//! upstream calendar changes on the order of months).

use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::errors::Result;

use super::cache::{CacheConfig, CacheStore};
use super::client::ClientConfig;
use super::engine::HolidayEngine;
use super::fetcher::Fetcher;
use super::models::{DataSource, VacationPeriod};
use super::registry::{self, Zone};
use super::static_data::static_periods;

/// Options for constructing a [`Session`]
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Zone label: "A", "B", "C" or a DOM-TOM territory name
    pub zone: String,
    /// Academy within the zone; defaults to the zone's first academy
    pub academy: Option<String>,
    /// Host storage root for the cache directory; `None` disables caching
    pub storage_root: Option<PathBuf>,
    /// Verify TLS certificates on API requests
    pub verify_tls: bool,
    /// IANA timezone override; invalid values degrade to Europe/Paris
    pub timezone: Option<String>,
    /// HTTP client settings (endpoint, timeouts)
    pub client: ClientConfig,
}

impl SessionOptions {
    /// Options for a zone with everything else defaulted
    pub fn new(zone: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            academy: None,
            storage_root: None,
            verify_tls: true,
            timezone: None,
            client: ClientConfig::default(),
        }
    }
}

/// Resolution state swapped wholesale on each refresh
#[derive(Debug)]
struct ResolutionState {
    engine: HolidayEngine,
    source: DataSource,
}

/// One (zone, academy) holiday resolution session
///
/// Construction fails fast on an invalid zone/academy pair. Until the first
/// successful refresh the session answers queries from the static dataset,
/// so accessors never see empty data.
#[derive(Debug)]
pub struct Session {
    zone: Zone,
    academy: String,
    timezone: Tz,
    fetcher: Fetcher,
    state: RwLock<ResolutionState>,
    refresh_guard: Mutex<()>,
}

impl Session {
    /// Create a session, validating the configuration against the registry
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidZone` / `InvalidAcademy` for pairs not
    /// in the registry. An invalid timezone override is not an error: it
    /// degrades to Europe/Paris with a warning.
    pub fn new(options: SessionOptions) -> Result<Self> {
        let zone: Zone = options.zone.parse()?;
        let academy = registry::validate_academy(zone, options.academy.as_deref())?;
        let timezone = registry::resolve_timezone(zone, options.timezone.as_deref());

        let cache = options
            .storage_root
            .as_deref()
            .map(|root| CacheStore::new(CacheConfig::under_storage_root(root)));

        let client_config = ClientConfig {
            verify_tls: options.verify_tls,
            ..options.client
        };
        let fetcher = Fetcher::new(zone, academy.clone(), timezone, client_config, cache)?;

        info!(
            "Initialized session for zone {}, academy {}, timezone {}, verify_tls {}",
            zone, academy, timezone, options.verify_tls
        );

        // Pre-refresh queries answer from the built-in dataset
        let engine = HolidayEngine::new(static_periods(zone, &academy, timezone), timezone);
        Ok(Self {
            zone,
            academy,
            timezone,
            fetcher,
            state: RwLock::new(ResolutionState {
                engine,
                source: DataSource::Static,
            }),
            refresh_guard: Mutex::new(()),
        })
    }

    /// Run one refresh cycle, replacing the engine state wholesale
    ///
    /// Returns `true` when data came from the network or cache, `false`
    /// when degraded to the static dataset (the host should retry next
    /// cycle). A refresh racing an in-flight one is skipped and reports
    /// the current state instead.
    pub async fn refresh(&self) -> bool {
        let _guard = match self.refresh_guard.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!(
                    "Refresh already in progress for zone {}, academy {}; skipping",
                    self.zone, self.academy
                );
                return self.source().await.is_success();
            }
        };

        let outcome = self.fetcher.fetch().await;
        let success = outcome.source.is_success();
        let engine = HolidayEngine::new(outcome.periods, self.timezone);
        let mut state = self.state.write().await;
        state.engine = engine;
        state.source = outcome.source;
        success
    }

    /// The vacation period containing today, if any
    pub async fn current_period(&self) -> Option<VacationPeriod> {
        self.state.read().await.engine.current_period().cloned()
    }

    /// The next vacation period after today, if any
    pub async fn next_period(&self) -> Option<VacationPeriod> {
        self.state.read().await.engine.next_period().cloned()
    }

    /// Whole days until the next period starts
    pub async fn days_until_next(&self) -> Option<i64> {
        self.state.read().await.engine.days_until_next()
    }

    /// Remaining days of the current period, inclusive of its end date
    pub async fn days_remaining_in_current(&self) -> Option<i64> {
        self.state.read().await.engine.days_remaining_in_current()
    }

    /// Whether today is inside a vacation period
    pub async fn is_on_vacation(&self) -> bool {
        self.state.read().await.engine.is_on_vacation()
    }

    /// The full sorted period list, for calendar-style consumers
    pub async fn periods(&self) -> Vec<VacationPeriod> {
        self.state.read().await.engine.periods().to_vec()
    }

    /// All periods overlapping the inclusive date range
    pub async fn periods_overlapping(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Vec<VacationPeriod> {
        self.state
            .read()
            .await
            .engine
            .periods_overlapping(range_start, range_end)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Provenance of the data currently in hand
    pub async fn source(&self) -> DataSource {
        self.state.read().await.source
    }

    /// The validated zone
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// The resolved academy
    pub fn academy(&self) -> &str {
        &self.academy
    }

    /// The effective timezone
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn offline_options(zone: &str) -> SessionOptions {
        SessionOptions {
            client: ClientConfig {
                records_url: "http://127.0.0.1:9/records".to_string(),
                request_timeout: Duration::from_secs(2),
                connect_timeout: Duration::from_secs(2),
                ..Default::default()
            },
            ..SessionOptions::new(zone)
        }
    }

    #[test]
    fn test_invalid_zone_fails_construction() {
        let result = Session::new(SessionOptions::new("D"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_academy_fails_construction() {
        let mut options = SessionOptions::new("A");
        options.academy = Some("Lille".to_string());
        assert!(Session::new(options).is_err());
    }

    #[test]
    fn test_academy_defaults_to_first_in_zone() {
        let session = Session::new(SessionOptions::new("B")).unwrap();
        assert_eq!(session.academy(), "Aix-Marseille");
    }

    #[test]
    fn test_domtom_timezone_resolution() {
        let session = Session::new(SessionOptions::new("La Réunion")).unwrap();
        assert_eq!(session.timezone(), chrono_tz::Indian::Reunion);
        assert_eq!(session.academy(), "La Réunion");
    }

    #[tokio::test]
    async fn test_queries_answerable_before_first_refresh() {
        let session = Session::new(offline_options("A")).unwrap();
        assert_eq!(session.source().await, DataSource::Static);
        assert!(!session.periods().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_reports_false_but_keeps_data() {
        let session = Session::new(offline_options("C")).unwrap();
        let success = session.refresh().await;
        assert!(!success);
        assert_eq!(session.source().await, DataSource::Static);
        assert!(!session.periods().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_skipped_while_guard_is_held() {
        let session = Session::new(offline_options("A")).unwrap();
        // Simulate an in-flight refresh by holding the guard
        let _held = session.refresh_guard.lock().await;

        let success = session.refresh().await;

        // Skipped: reports the current (static) state without fetching
        assert!(!success);
        assert_eq!(session.source().await, DataSource::Static);
        assert!(!session.periods().await.is_empty());
    }

    #[tokio::test]
    async fn test_racing_refreshes_are_single_flight() {
        let session = Session::new(offline_options("B")).unwrap();
        let before = session.periods().await;

        // One of the two acquires the guard; the other skips and reports
        // the current state. Either way both resolve without deadlock.
        let (first, second) = tokio::join!(session.refresh(), session.refresh());

        assert!(!first);
        assert!(!second);
        assert_eq!(session.source().await, DataSource::Static);
        assert_eq!(session.periods().await, before);
    }

    #[tokio::test]
    async fn test_repeated_queries_identical_between_refreshes() {
        let session = Session::new(offline_options("A")).unwrap();
        session.refresh().await;
        let first = session.next_period().await;
        let second = session.next_period().await;
        assert_eq!(first, second);
    }
}
