//! HTTP client for the school holiday dataset API
//!
//! Builds a reqwest client tuned for the OpenDataSoft records endpoint and
//! issues filtered queries. The endpoint is public and unauthenticated; the
//! only negotiable transport concern is TLS verification, which some host
//! environments need to disable.

use std::time::Duration;

use chrono::Datelike;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::constants::{api, http};
use crate::errors::{FetchError, FetchResult};

use super::registry::Zone;

/// Configuration for the dataset API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Records endpoint (overridable for tests)
    pub records_url: String,
    /// Verify TLS certificates
    pub verify_tls: bool,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Maximum records per query
    pub record_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            records_url: api::RECORDS_URL.to_string(),
            verify_tls: true,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            record_limit: api::RECORD_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the client cannot be constructed.
    pub fn build_http_client(&self) -> FetchResult<Client> {
        Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT)
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()
            .map_err(FetchError::Http)
    }
}

/// Client for the fr-en-calendrier-scolaire records endpoint
#[derive(Debug, Clone)]
pub struct VacancesClient {
    client: Client,
    config: ClientConfig,
}

impl VacancesClient {
    /// Create a client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the endpoint URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        // Validate the endpoint up front so a bad override fails loudly
        Url::parse(&config.records_url).map_err(|_| FetchError::InvalidUrl {
            url: config.records_url.clone(),
        })?;
        let client = config.build_http_client()?;
        Ok(Self { client, config })
    }

    /// Fetch the raw payload of holiday records for a (zone, academy) pair
    ///
    /// Issues one filtered GET; no retries here. Transient failures are
    /// handled one layer up by the cache/static fallback chain.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failure, timeout, non-200 status,
    /// or a non-JSON response body.
    pub async fn fetch_payload(&self, zone: Zone, academy: &str) -> FetchResult<Value> {
        let current_year = chrono::Utc::now().year();
        let where_clause = build_where_clause(zone, academy, current_year);
        debug!(
            "Fetching {} with where: {}",
            self.config.records_url, where_clause
        );

        let response = self
            .client
            .get(&self.config.records_url)
            .query(&[
                ("limit", self.config.record_limit.to_string()),
                ("where", where_clause),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("API response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API returned status {}: {}", status, body);
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(FetchError::Decode)
    }
}

/// Build the OpenDataSoft `where` filter expression
///
/// Combines zone equality (metropolitan zones only; DOM-TOM records are
/// selected through their location), academy/location equality, a
/// date-overlap predicate against the two-year window
/// [Jan 1 of `current_year`, Dec 31 of the next year], and the population
/// predicate keeping universal and student records.
fn build_where_clause(zone: Zone, academy: &str, current_year: i32) -> String {
    let mut clauses = Vec::new();

    if zone.is_metropolitan() {
        clauses.push(format!("zones=\"{}\"", zone.api_label()));
    }
    if !academy.is_empty() {
        clauses.push(format!("location=\"{}\"", academy));
    }

    let window_start = format!("{}-01-01", current_year);
    let window_end = format!("{}-12-31", current_year + 1);
    clauses.push(format!(
        "start_date <= \"{}\" AND end_date >= \"{}\"",
        window_end, window_start
    ));

    clauses.push("(population=\"-\" OR population=\"Élèves\")".to_string());

    clauses.join(" AND ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_metropolitan() {
        let clause = build_where_clause(Zone::A, "Lyon", 2026);
        assert!(clause.contains("zones=\"Zone A\""));
        assert!(clause.contains("location=\"Lyon\""));
        assert!(clause.contains("start_date <= \"2027-12-31\""));
        assert!(clause.contains("end_date >= \"2026-01-01\""));
        assert!(clause.contains("population=\"Élèves\""));
    }

    #[test]
    fn test_where_clause_domtom_has_no_zone_filter() {
        let clause = build_where_clause(Zone::Reunion, "La Réunion", 2026);
        assert!(!clause.contains("zones="));
        assert!(clause.contains("location=\"La Réunion\""));
    }

    #[test]
    fn test_where_clause_excludes_teachers() {
        let clause = build_where_clause(Zone::B, "Lille", 2026);
        assert!(!clause.contains("Enseignants"));
        assert!(clause.contains("(population=\"-\" OR population=\"Élèves\")"));
    }

    #[test]
    fn test_client_creation_with_defaults() {
        let client = VacancesClient::new(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_endpoint() {
        let config = ClientConfig {
            records_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            VacancesClient::new(config),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_client_with_tls_verification_disabled() {
        let config = ClientConfig {
            verify_tls: false,
            ..Default::default()
        };
        assert!(VacancesClient::new(config).is_ok());
    }
}
