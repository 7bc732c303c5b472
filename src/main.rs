//! Vacances Scolaires CLI application
//!
//! Command-line interface for querying French school holiday periods by
//! zone and academy, backed by the official open dataset with a local
//! cache and a built-in fallback calendar.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use vacances_scolaires::cli::{handle_cache, handle_calendar, handle_status, Cli, Commands};
use vacances_scolaires::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("vacances_scolaires v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Status(args) => handle_status(&cli.global, args).await,
        Commands::Calendar(args) => handle_calendar(&cli.global, args).await,
        Commands::Cache(args) => handle_cache(&cli.global, args).await,
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("vacances_scolaires={}", log_level).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();
}
