//! Fetch pipeline with cache and static fallback
//!
//! Resolves the vacation periods for one (zone, academy) pair by consulting,
//! in order: the fresh cache, the network, any stale cache, and finally the
//! built-in static dataset. The pipeline never fails: degradation is
//! reported through `DataSource`, and the worst case still yields non-empty
//! period data.
//!
//! The cache freshness window deliberately bounds request volume: once a
//! fresh entry exists, the network is not consulted again until it expires.

use chrono_tz::Tz;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::cache::CacheStore;
use super::client::{ClientConfig, VacancesClient};
use super::models::{DataSource, VacationPeriod};
use super::parser::parse_periods;
use super::registry::Zone;
use super::static_data::static_periods;
use crate::errors::FetchResult;

/// Result of one fetch cycle: the resolved periods and their provenance
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Periods sorted ascending by start date; never empty
    pub periods: Vec<VacationPeriod>,
    /// Where the data came from
    pub source: DataSource,
}

/// Fetches and resolves vacation periods for one (zone, academy) pair
#[derive(Debug)]
pub struct Fetcher {
    zone: Zone,
    academy: String,
    timezone: Tz,
    client: VacancesClient,
    cache: Option<CacheStore>,
}

impl Fetcher {
    /// Create a fetcher
    ///
    /// `cache` is optional; without it every cycle goes straight to the
    /// network with only the static dataset as fallback.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the HTTP client cannot be constructed.
    pub fn new(
        zone: Zone,
        academy: String,
        timezone: Tz,
        client_config: ClientConfig,
        cache: Option<CacheStore>,
    ) -> FetchResult<Self> {
        let client = VacancesClient::new(client_config)?;
        Ok(Self {
            zone,
            academy,
            timezone,
            client,
            cache,
        })
    }

    /// Run one fetch cycle
    ///
    /// Never fails; a degraded result is signalled by
    /// `outcome.source == DataSource::Static` (and
    /// `DataSource::is_success()` for callers that only need a flag).
    pub async fn fetch(&self) -> FetchOutcome {
        // 1. Fresh cache wins without touching the network
        if let Some(periods) = self.load_fresh_cache().await {
            return FetchOutcome {
                periods,
                source: DataSource::Cache,
            };
        }

        // 2. Network attempt
        match self.client.fetch_payload(self.zone, &self.academy).await {
            Ok(payload) => {
                // Cache the raw payload before parsing so a valid-but-odd
                // response is still available to later cycles
                self.save_cache(&payload).await;
                let periods = self.parse_payload(&payload);
                if !periods.is_empty() {
                    info!(
                        "Fetched {} vacation periods from API for zone {}, academy {}",
                        periods.len(),
                        self.zone,
                        self.academy
                    );
                    return FetchOutcome {
                        periods,
                        source: DataSource::Network,
                    };
                }
                warn!(
                    "API payload yielded no vacation periods for zone {}, academy {}; \
                     using static data",
                    self.zone, self.academy
                );
            }
            Err(e) => {
                warn!("Failed to fetch from dataset API: {}", e);
                // 3. Stale cache beats static data
                if let Some(periods) = self.load_any_cache().await {
                    warn!(
                        "Using stale cached data for zone {}, academy {} after API failure",
                        self.zone, self.academy
                    );
                    return FetchOutcome {
                        periods,
                        source: DataSource::Cache,
                    };
                }
            }
        }

        // 4. Built-in static dataset, guaranteed non-empty
        info!(
            "No API data and no usable cache for zone {}, academy {}; using static data",
            self.zone, self.academy
        );
        FetchOutcome {
            periods: static_periods(self.zone, &self.academy, self.timezone),
            source: DataSource::Static,
        }
    }

    /// Load and parse the cache entry if it is still fresh
    ///
    /// An empty parse falls through to the network rather than masking a
    /// filter mismatch behind a fresh-looking cache entry.
    async fn load_fresh_cache(&self) -> Option<Vec<VacationPeriod>> {
        let store = self.cache.as_ref()?;
        if let Err(e) = store.ensure_dir().await {
            warn!("Cannot create cache directory: {}", e);
            return None;
        }
        let path = store.entry_path(self.zone.label(), &self.academy);
        if !store.is_valid(&path).await {
            return None;
        }
        let payload = match store.load(&path).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to load cache for zone {}: {}", self.zone, e);
                return None;
            }
        };
        let periods = self.parse_payload(&payload);
        if periods.is_empty() {
            debug!("Fresh cache entry parsed to zero periods; refreshing from network");
            return None;
        }
        info!(
            "Loaded {} vacation periods from cache for zone {}, academy {}",
            periods.len(),
            self.zone,
            self.academy
        );
        Some(periods)
    }

    /// Load and parse any cache entry regardless of freshness
    async fn load_any_cache(&self) -> Option<Vec<VacationPeriod>> {
        let store = self.cache.as_ref()?;
        let path = store.entry_path(self.zone.label(), &self.academy);
        let payload = store.load(&path).await.ok()?;
        let periods = self.parse_payload(&payload);
        if periods.is_empty() {
            None
        } else {
            Some(periods)
        }
    }

    async fn save_cache(&self, payload: &Value) {
        if let Some(store) = &self.cache {
            if let Err(e) = store.ensure_dir().await {
                warn!("Cannot create cache directory: {}", e);
                return;
            }
            let path = store.entry_path(self.zone.label(), &self.academy);
            store.save(&path, payload).await;
        }
    }

    /// Parse a payload, treating structural rejection as an empty result
    fn parse_payload(&self, payload: &Value) -> Vec<VacationPeriod> {
        match parse_periods(payload, self.zone, &self.academy, self.timezone) {
            Ok(periods) => periods,
            Err(e) => {
                warn!("Rejected API payload: {}", e);
                Vec::new()
            }
        }
    }
}
