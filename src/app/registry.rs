//! Zone and academy registry
//!
//! Static mapping of the French school holiday zones (metropolitan A/B/C and
//! the DOM-TOM territories) to their academies and IANA timezones. The data
//! is immutable process-wide; (zone, academy) pairs are validated here at
//! session construction time.

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use tracing::warn;

use crate::errors::{ConfigError, ConfigResult};

/// A school holiday scheduling zone
///
/// Metropolitan France is split into three zones (A, B, C) that follow
/// staggered calendars. Each DOM-TOM territory follows its own independent
/// calendar and maps to a single academy equal to the territory itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    A,
    B,
    C,
    Guadeloupe,
    Martinique,
    Guyane,
    Reunion,
    Mayotte,
    NouvelleCaledonie,
    Polynesie,
    WallisEtFutuna,
    SaintPierreEtMiquelon,
}

/// All zones, metropolitan first, in declaration order
pub const ALL_ZONES: [Zone; 12] = [
    Zone::A,
    Zone::B,
    Zone::C,
    Zone::Guadeloupe,
    Zone::Martinique,
    Zone::Guyane,
    Zone::Reunion,
    Zone::Mayotte,
    Zone::NouvelleCaledonie,
    Zone::Polynesie,
    Zone::WallisEtFutuna,
    Zone::SaintPierreEtMiquelon,
];

/// Academies of zone A, in declaration order
const ZONE_A_ACADEMIES: [&str; 8] = [
    "Besançon",
    "Bordeaux",
    "Clermont-Ferrand",
    "Dijon",
    "Grenoble",
    "Limoges",
    "Lyon",
    "Poitiers",
];

/// Academies of zone B, in declaration order
const ZONE_B_ACADEMIES: [&str; 12] = [
    "Aix-Marseille",
    "Amiens",
    "Caen",
    "Lille",
    "Nancy-Metz",
    "Nantes",
    "Nice",
    "Orléans-Tours",
    "Reims",
    "Rennes",
    "Rouen",
    "Strasbourg",
];

/// Academies of zone C, in declaration order
const ZONE_C_ACADEMIES: [&str; 5] = [
    "Créteil",
    "Île-de-France",
    "Montpellier",
    "Toulouse",
    "Corse",
];

impl Zone {
    /// The configuration label for this zone ("A", "B", "C" or the territory name)
    pub fn label(&self) -> &'static str {
        match self {
            Zone::A => "A",
            Zone::B => "B",
            Zone::C => "C",
            Zone::Guadeloupe => "Guadeloupe",
            Zone::Martinique => "Martinique",
            Zone::Guyane => "Guyane",
            Zone::Reunion => "La Réunion",
            Zone::Mayotte => "Mayotte",
            Zone::NouvelleCaledonie => "Nouvelle-Calédonie",
            Zone::Polynesie => "Polynésie française",
            Zone::WallisEtFutuna => "Wallis-et-Futuna",
            Zone::SaintPierreEtMiquelon => "Saint-Pierre-et-Miquelon",
        }
    }

    /// Whether this is a metropolitan zone (A, B or C)
    pub fn is_metropolitan(&self) -> bool {
        matches!(self, Zone::A | Zone::B | Zone::C)
    }

    /// The zone string as it appears in upstream records
    ///
    /// The dataset tags metropolitan records with "Zone A"/"Zone B"/"Zone C"
    /// and DOM-TOM records with the territory name itself.
    pub fn api_label(&self) -> String {
        if self.is_metropolitan() {
            format!("Zone {}", self.label())
        } else {
            self.label().to_string()
        }
    }

    /// Valid academies for this zone, in declaration order
    ///
    /// The first entry is the default academy when none is configured.
    /// DOM-TOM territories have exactly one academy: the territory itself.
    pub fn academies(&self) -> &'static [&'static str] {
        match self {
            Zone::A => &ZONE_A_ACADEMIES,
            Zone::B => &ZONE_B_ACADEMIES,
            Zone::C => &ZONE_C_ACADEMIES,
            Zone::Guadeloupe => &["Guadeloupe"],
            Zone::Martinique => &["Martinique"],
            Zone::Guyane => &["Guyane"],
            Zone::Reunion => &["La Réunion"],
            Zone::Mayotte => &["Mayotte"],
            Zone::NouvelleCaledonie => &["Nouvelle-Calédonie"],
            Zone::Polynesie => &["Polynésie française"],
            Zone::WallisEtFutuna => &["Wallis-et-Futuna"],
            Zone::SaintPierreEtMiquelon => &["Saint-Pierre-et-Miquelon"],
        }
    }

    /// Default IANA timezone for this zone
    pub fn timezone(&self) -> Tz {
        match self {
            Zone::A | Zone::B | Zone::C => chrono_tz::Europe::Paris,
            Zone::Guadeloupe => chrono_tz::America::Guadeloupe,
            Zone::Martinique => chrono_tz::America::Martinique,
            Zone::Guyane => chrono_tz::America::Cayenne,
            Zone::Reunion => chrono_tz::Indian::Reunion,
            Zone::Mayotte => chrono_tz::Indian::Mayotte,
            Zone::NouvelleCaledonie => chrono_tz::Pacific::Noumea,
            Zone::Polynesie => chrono_tz::Pacific::Tahiti,
            Zone::WallisEtFutuna => chrono_tz::Pacific::Wallis,
            Zone::SaintPierreEtMiquelon => chrono_tz::America::Miquelon,
        }
    }

    /// Comma-separated list of all zone labels, for error messages
    fn valid_labels() -> String {
        ALL_ZONES
            .iter()
            .map(|z| z.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Zone {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        ALL_ZONES
            .into_iter()
            .find(|z| z.label() == s)
            .ok_or_else(|| ConfigError::InvalidZone {
                zone: s.to_string(),
                valid: Zone::valid_labels(),
            })
    }
}

/// Validate a (zone, academy) pair against the registry
///
/// If `academy` is `None`, resolves to the zone's first declared academy.
///
/// # Errors
///
/// Returns `ConfigError::InvalidAcademy` if the academy is supplied but does
/// not belong to the zone.
pub fn validate_academy(zone: Zone, academy: Option<&str>) -> ConfigResult<String> {
    let academies = zone.academies();
    match academy {
        Some(name) if !name.is_empty() => {
            if academies.contains(&name) {
                Ok(name.to_string())
            } else {
                Err(ConfigError::InvalidAcademy {
                    academy: name.to_string(),
                    zone: zone.label().to_string(),
                    valid: academies.join(", "),
                })
            }
        }
        _ => Ok(academies[0].to_string()),
    }
}

/// Resolve the effective timezone for a zone, honouring an optional override
///
/// No override means the zone default. An unparseable override degrades to
/// Europe/Paris with a warning rather than failing construction, regardless
/// of the zone.
pub fn resolve_timezone(zone: Zone, custom: Option<&str>) -> Tz {
    match custom {
        Some(id) if !id.is_empty() => match id.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    "Invalid timezone '{}' for zone {}, falling back to Europe/Paris",
                    id,
                    zone.label()
                );
                chrono_tz::Europe::Paris
            }
        },
        _ => zone.timezone(),
    }
}
