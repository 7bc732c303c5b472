//! Application constants for the vacances scolaires resolver
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Upstream dataset API configuration
pub mod api {
    use super::Duration;

    /// OpenDataSoft records endpoint for the official school holiday calendar
    pub const RECORDS_URL: &str =
        "https://data.education.gouv.fr/api/explore/v2.1/catalog/datasets/fr-en-calendrier-scolaire/records";

    /// Maximum number of records to request per query
    pub const RECORD_LIMIT: u32 = 100;

    /// Timeout for a single API request
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
}

/// HTTP client configuration constants
pub mod http {
    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "vacances-scolaires/0.1.0 (School Holiday Resolver)";
}

/// Cache configuration constants
pub mod cache {
    use super::Duration;

    /// How long a cached payload stays fresh before a network refresh
    pub const VALIDITY_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    /// Subdirectory under the storage root holding cache files
    pub const CACHE_DIR_NAME: &str = "vacances_scolaires";

    /// Prefix for per-(zone, academy) cache file names
    pub const CACHE_FILE_PREFIX: &str = "vacances";

    /// Directory permissions for the cache directory (Unix only) - owner access only
    #[cfg(unix)]
    pub const CACHE_DIR_PERMISSIONS: u32 = 0o700;
}

/// Population tags accepted from upstream records
///
/// The dataset tags each record with the population it applies to. Teacher-only
/// periods ("Enseignants") are always excluded.
pub mod population {
    /// Applies to everyone
    pub const ALL: &str = "-";

    /// Applies to students
    pub const STUDENTS: &str = "Élèves";
}

/// Refresh scheduling defaults for host integrations
pub mod refresh {
    /// Default interval between scheduled refreshes, in days
    pub const DEFAULT_INTERVAL_DAYS: u64 = 7;
}

// Re-export commonly used constants for convenience
pub use api::{RECORDS_URL, RECORD_LIMIT, REQUEST_TIMEOUT};
pub use cache::{CACHE_DIR_NAME, VALIDITY_WINDOW};
pub use http::USER_AGENT;
