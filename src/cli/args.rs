//! Command-line argument parsing
//!
//! This module defines the CLI structure using clap derive macros, covering
//! holiday status queries, calendar listings and cache management.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Vacances Scolaires - French school holiday lookup
#[derive(Parser, Debug)]
#[command(
    name = "vacances_scolaires",
    version,
    about = "Query French school holiday periods by zone and academy",
    long_about = "Resolves French school holiday periods (zones A/B/C and DOM-TOM territories) \
from the official open dataset, with a local cache and a built-in fallback calendar."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Storage root for the cache directory
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show current and next holiday periods for a zone
    Status(StatusArgs),

    /// List holiday periods overlapping a date range
    Calendar(CalendarArgs),

    /// Cache inspection and cleanup
    Cache(CacheArgs),
}

/// Zone selection arguments shared by query commands
#[derive(Args, Debug, Clone)]
pub struct ZoneArgs {
    /// Zone: A, B, C or a DOM-TOM territory name
    #[arg(short, long)]
    pub zone: Option<String>,

    /// Academy within the zone
    #[arg(short, long)]
    pub academy: Option<String>,

    /// IANA timezone override (e.g. "Indian/Reunion")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub no_verify_tls: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,
}

/// Arguments for the calendar command
#[derive(Args, Debug)]
pub struct CalendarArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,

    /// Range start (YYYY-MM-DD, default today)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD, default one year after the start)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Emit the period list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for cache management
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache management actions
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache location and stored entries
    Info,
    /// Remove all cached payloads
    Clear,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective log level directive from the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.global.very_verbose {
            "debug"
        } else if self.global.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_command_parsing() {
        let cli = Cli::try_parse_from(["vacances_scolaires", "status", "--zone", "B"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert_eq!(args.zone.zone.as_deref(), Some("B")),
            _ => panic!("expected status command"),
        }
    }

    #[test]
    fn test_calendar_range_parsing() {
        let cli = Cli::try_parse_from([
            "vacances_scolaires",
            "calendar",
            "--zone",
            "A",
            "--from",
            "2026-01-01",
            "--to",
            "2026-06-30",
        ])
        .unwrap();
        match cli.command {
            Commands::Calendar(args) => {
                assert_eq!(args.from.unwrap(), "2026-01-01".parse().unwrap());
                assert_eq!(args.to.unwrap(), "2026-06-30".parse().unwrap());
            }
            _ => panic!("expected calendar command"),
        }
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result = Cli::try_parse_from([
            "vacances_scolaires",
            "calendar",
            "--from",
            "not-a-date",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_from_verbosity() {
        let cli = Cli::try_parse_from(["vacances_scolaires", "-v", "cache", "info"]).unwrap();
        assert_eq!(cli.log_level(), "info");
        let cli =
            Cli::try_parse_from(["vacances_scolaires", "--very-verbose", "cache", "info"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
    }
}
