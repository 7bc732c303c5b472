//! Built-in fallback holiday dataset
//!
//! Last-resort data used when both the network and the cache fail, so
//! queries always have a non-empty period sequence to answer from. The
//! tables carry the published metropolitan calendar for the 2025-2026
//! school year and the start of 2026-2027. DOM-TOM territories follow
//! locally adapted calendars that this snapshot cannot capture, so they
//! receive the nationwide periods (Toussaint, Noël, summer) as an
//! approximation until a real fetch succeeds.

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::models::VacationPeriod;
use super::registry::Zone;

/// One table row: name, start (y, m, d), inclusive end (y, m, d)
type Row = (&'static str, (i32, u32, u32), (i32, u32, u32));

/// Periods shared by all metropolitan zones, also used for DOM-TOM
const COMMON_PERIODS: [Row; 5] = [
    ("Vacances de la Toussaint", (2025, 10, 18), (2025, 11, 2)),
    ("Vacances de Noël", (2025, 12, 20), (2026, 1, 4)),
    ("Vacances d'Été", (2026, 7, 4), (2026, 8, 31)),
    ("Vacances de la Toussaint", (2026, 10, 17), (2026, 11, 1)),
    ("Vacances de Noël", (2026, 12, 19), (2027, 1, 3)),
];

/// Zone A winter and spring breaks
const ZONE_A_PERIODS: [Row; 2] = [
    ("Vacances d'Hiver", (2026, 2, 7), (2026, 2, 22)),
    ("Vacances de Printemps", (2026, 4, 4), (2026, 4, 19)),
];

/// Zone B winter and spring breaks
const ZONE_B_PERIODS: [Row; 2] = [
    ("Vacances d'Hiver", (2026, 2, 14), (2026, 3, 1)),
    ("Vacances de Printemps", (2026, 4, 11), (2026, 4, 26)),
];

/// Zone C winter and spring breaks
const ZONE_C_PERIODS: [Row; 2] = [
    ("Vacances d'Hiver", (2026, 2, 21), (2026, 3, 8)),
    ("Vacances de Printemps", (2026, 4, 18), (2026, 5, 3)),
];

fn date(ymd: (i32, u32, u32)) -> NaiveDate {
    // Table literals are compile-time constants and always valid
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).expect("invalid date in static table")
}

/// Build the fallback period sequence for a (zone, academy) pair
///
/// Returns periods sorted ascending by start date; never empty for any
/// valid zone.
pub fn static_periods(zone: Zone, academy: &str, timezone: Tz) -> Vec<VacationPeriod> {
    let zone_rows: &[Row] = match zone {
        Zone::A => &ZONE_A_PERIODS,
        Zone::B => &ZONE_B_PERIODS,
        Zone::C => &ZONE_C_PERIODS,
        _ => &[],
    };

    let mut periods: Vec<VacationPeriod> = COMMON_PERIODS
        .iter()
        .chain(zone_rows.iter())
        .map(|(name, start, end)| VacationPeriod {
            name: (*name).to_string(),
            start: date(*start),
            end: date(*end),
            zones: vec![zone.api_label()],
            academy: academy.to_string(),
            timezone,
        })
        .collect();

    periods.sort_by_key(|p| p.start);
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::registry::ALL_ZONES;

    #[test]
    fn test_static_data_non_empty_for_every_zone() {
        for zone in ALL_ZONES {
            let academy = zone.academies()[0];
            let periods = static_periods(zone, academy, zone.timezone());
            assert!(!periods.is_empty(), "zone {} has no static data", zone);
        }
    }

    #[test]
    fn test_static_data_sorted_and_well_formed() {
        let periods = static_periods(Zone::B, "Lille", chrono_tz::Europe::Paris);
        for pair in periods.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        for p in &periods {
            assert!(p.start <= p.end, "period '{}' inverted", p.name);
            assert_eq!(p.academy, "Lille");
        }
    }

    #[test]
    fn test_metropolitan_zones_have_staggered_winter_breaks() {
        let winter = |zone: Zone| {
            static_periods(zone, "x", chrono_tz::Europe::Paris)
                .into_iter()
                .find(|p| p.name == "Vacances d'Hiver")
                .unwrap()
                .start
        };
        assert!(winter(Zone::A) < winter(Zone::B));
        assert!(winter(Zone::B) < winter(Zone::C));
    }

    #[test]
    fn test_domtom_gets_nationwide_periods_only() {
        let periods = static_periods(
            Zone::Reunion,
            "La Réunion",
            chrono_tz::Indian::Reunion,
        );
        assert_eq!(periods.len(), COMMON_PERIODS.len());
        assert!(periods.iter().all(|p| p.zones == vec!["La Réunion"]));
    }
}
