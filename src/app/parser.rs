//! Upstream payload parsing and filtering
//!
//! Transforms a raw API payload into normalized, sorted `VacationPeriod`
//! entities. Individual malformed records are skipped with a debug log;
//! only a structurally invalid payload (not an object, no `results` key)
//! is rejected as a whole.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::constants::population;
use crate::errors::ParseError;

use super::models::{ApiRecord, VacationPeriod};
use super::registry::Zone;

/// Parse an upstream payload into vacation periods for one (zone, academy)
///
/// Applies the population, zone label and academy filters, skips records
/// with unparseable dates, and returns the survivors sorted ascending by
/// start date. An empty result is legal (logged as a warning); deciding
/// whether it warrants the static fallback belongs to the fetch pipeline.
///
/// # Errors
///
/// Returns `ParseError` if the payload is not a JSON object or lacks the
/// `results` key.
pub fn parse_periods(
    payload: &Value,
    zone: Zone,
    academy: &str,
    timezone: Tz,
) -> Result<Vec<VacationPeriod>, ParseError> {
    let map = payload.as_object().ok_or(ParseError::NotAnObject)?;
    let results = map
        .get("results")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingResults)?;

    let expected_zone = zone.api_label();
    debug!(
        "Processing {} records for zone '{}', academy '{}'",
        results.len(),
        expected_zone,
        academy
    );

    let mut periods = Vec::new();
    for raw in results {
        let record: ApiRecord = match serde_json::from_value(raw.clone()) {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping malformed record: {}", e);
                continue;
            }
        };
        if let Some(period) = convert_record(&record, &expected_zone, academy, timezone) {
            periods.push(period);
        }
    }

    if periods.is_empty() {
        warn!(
            "No vacation periods found for zone '{}', academy '{}' in payload",
            expected_zone, academy
        );
    } else {
        periods.sort_by_key(|p| p.start);
        info!(
            "Parsed {} vacation periods for zone '{}', academy '{}'",
            periods.len(),
            expected_zone,
            academy
        );
    }

    Ok(periods)
}

/// Filter and normalize a single record; `None` means it was skipped
fn convert_record(
    record: &ApiRecord,
    expected_zone: &str,
    academy: &str,
    timezone: Tz,
) -> Option<VacationPeriod> {
    let name = record.description.as_deref().unwrap_or("").trim();
    let zones_str = record.zones.as_deref().unwrap_or("").trim();
    let location = record.location.as_deref().unwrap_or("").trim();
    let population_tag = record.population.as_deref().unwrap_or("").trim();

    // Keep only student-applicable or universal records
    if !population_tag.is_empty()
        && population_tag != population::ALL
        && population_tag != population::STUDENTS
    {
        debug!(
            "Skipping '{}': population '{}' is not student-applicable",
            name, population_tag
        );
        return None;
    }

    if zones_str != expected_zone {
        debug!(
            "Skipping '{}': zones '{}' (looking for '{}')",
            name, zones_str, expected_zone
        );
        return None;
    }

    if !location.is_empty() && location != academy {
        debug!(
            "Skipping '{}': location '{}' (looking for '{}')",
            name, location, academy
        );
        return None;
    }

    let start = match parse_iso_date(record.start_date.as_deref().unwrap_or("")) {
        Some(d) => d,
        None => {
            debug!("Skipping '{}': unparseable start date", name);
            return None;
        }
    };
    let end = match parse_iso_date(record.end_date.as_deref().unwrap_or("")) {
        Some(d) => d,
        None => {
            debug!("Skipping '{}': unparseable end date", name);
            return None;
        }
    };
    if start > end {
        debug!("Skipping '{}': start {} after end {}", name, start, end);
        return None;
    }

    Some(VacationPeriod {
        name: name.to_string(),
        start,
        end,
        zones: vec![zones_str.to_string()],
        academy: if location.is_empty() {
            academy.to_string()
        } else {
            location.to_string()
        },
        timezone,
    })
}

/// Parse an ISO calendar date, tolerating full RFC 3339 datetimes
///
/// The dataset has shipped both bare dates ("2025-10-18") and timestamped
/// forms ("2025-10-18T00:00:00+02:00") over time.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = s.parse::<NaiveDate>() {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
