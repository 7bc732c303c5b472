//! Data models for vacation periods and upstream records
//!
//! This module contains the normalized `VacationPeriod` entity produced by the
//! parser, the raw record shape returned by the upstream dataset API, and the
//! provenance marker for resolved data.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A contiguous inclusive date range designated as school holiday
///
/// Periods for a given (zone, academy) are kept sorted ascending by start
/// date. Invariant: `start <= end`. Adjacent or overlapping periods from the
/// source data are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacationPeriod {
    /// Free-text label, e.g. "Vacances de la Toussaint"
    pub name: String,
    /// First day of the holiday
    pub start: NaiveDate,
    /// Last day of the holiday (inclusive)
    pub end: NaiveDate,
    /// Zone labels this period applies to, as tagged upstream
    pub zones: Vec<String>,
    /// Owning academy label
    pub academy: String,
    /// Timezone used to interpret "today" for this period
    pub timezone: Tz,
}

impl VacationPeriod {
    /// Whether the given date falls within this period (inclusive bounds)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Where the currently held period data came from
///
/// Diagnostics only: query results are equally valid regardless of source,
/// but a `Static` source means both network and cache failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fresh data from the upstream API
    Network,
    /// Data from the local cache file (possibly stale)
    Cache,
    /// Built-in fallback dataset
    Static,
}

impl DataSource {
    /// Whether this source counts as a successful fetch
    ///
    /// Static data keeps queries answerable but is reported as a fetch
    /// failure so the host retries next cycle.
    pub fn is_success(&self) -> bool {
        !matches!(self, DataSource::Static)
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataSource::Network => "network",
            DataSource::Cache => "cache",
            DataSource::Static => "static",
        };
        f.write_str(s)
    }
}

/// A raw record as returned by the upstream dataset API
///
/// All fields are optional: malformed or partial records are filtered out by
/// the parser rather than failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRecord {
    /// Period label
    #[serde(default)]
    pub description: Option<String>,
    /// ISO date or datetime string
    #[serde(default)]
    pub start_date: Option<String>,
    /// ISO date or datetime string (inclusive end)
    #[serde(default)]
    pub end_date: Option<String>,
    /// Zone tag, e.g. "Zone A" or a DOM-TOM territory name
    #[serde(default)]
    pub zones: Option<String>,
    /// Academy name
    #[serde(default)]
    pub location: Option<String>,
    /// Population tag: "-", "Élèves" or "Enseignants"
    #[serde(default)]
    pub population: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(start: &str, end: &str) -> VacationPeriod {
        VacationPeriod {
            name: "Vacances de Noël".to_string(),
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            zones: vec!["Zone A".to_string()],
            academy: "Lyon".to_string(),
            timezone: chrono_tz::Europe::Paris,
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let p = period("2024-12-21", "2025-01-05");
        assert!(p.contains("2024-12-21".parse().unwrap()));
        assert!(p.contains("2025-01-05".parse().unwrap()));
        assert!(!p.contains("2024-12-20".parse().unwrap()));
        assert!(!p.contains("2025-01-06".parse().unwrap()));
    }

    #[test]
    fn test_static_source_is_not_success() {
        assert!(DataSource::Network.is_success());
        assert!(DataSource::Cache.is_success());
        assert!(!DataSource::Static.is_success());
    }

    #[test]
    fn test_api_record_tolerates_missing_fields() {
        let record: ApiRecord = serde_json::from_str("{}").unwrap();
        assert!(record.description.is_none());
        assert!(record.population.is_none());
    }
}
