//! CLI command handlers
//!
//! Each handler wires the parsed arguments and the optional config file
//! into a [`Session`] and prints human-readable (or JSON) results.

use std::path::PathBuf;

use chrono::Duration;
use tracing::info;

use crate::app::Session;
use crate::config::AppConfig;
use crate::constants::cache as cache_constants;
use crate::errors::{AppError, Result};

use super::args::{CacheAction, CacheArgs, CalendarArgs, GlobalArgs, StatusArgs, ZoneArgs};

/// Build a session from the config file, overridden by CLI arguments
async fn build_session(global: &GlobalArgs, zone_args: &ZoneArgs) -> Result<Session> {
    let config = AppConfig::load(global.config.clone()).await?;
    let mut options = config.to_session_options();

    if let Some(zone) = &zone_args.zone {
        options.zone = zone.clone();
        // A zone from the CLI invalidates the config file's academy
        options.academy = zone_args.academy.clone();
    } else if zone_args.academy.is_some() {
        options.academy = zone_args.academy.clone();
    }
    if let Some(tz) = &zone_args.timezone {
        options.timezone = Some(tz.clone());
    }
    if zone_args.no_verify_tls {
        options.verify_tls = false;
        options.client.verify_tls = false;
    }
    if let Some(dir) = &global.cache_dir {
        options.storage_root = Some(dir.clone());
    }

    Session::new(options)
}

/// Handle the status command
pub async fn handle_status(global: &GlobalArgs, args: StatusArgs) -> Result<()> {
    let session = build_session(global, &args.zone).await?;
    let success = session.refresh().await;

    println!(
        "Zone {} — académie {} ({})",
        session.zone(),
        session.academy(),
        session.timezone()
    );
    println!("Data source: {}", session.source().await);
    if !success {
        println!("Warning: live data unavailable, showing built-in calendar");
    }

    match session.current_period().await {
        Some(period) => {
            let remaining = session.days_remaining_in_current().await.unwrap_or(0);
            println!(
                "Currently on vacation: {} ({} to {}), {} day(s) remaining",
                period.name, period.start, period.end, remaining
            );
        }
        None => println!("Not currently on vacation"),
    }

    match session.next_period().await {
        Some(period) => {
            let days = session.days_until_next().await.unwrap_or(0);
            println!(
                "Next vacation: {} ({} to {}), in {} day(s)",
                period.name, period.start, period.end, days
            );
        }
        None => println!("No upcoming vacation in the known window"),
    }

    Ok(())
}

/// Handle the calendar command
pub async fn handle_calendar(global: &GlobalArgs, args: CalendarArgs) -> Result<()> {
    let session = build_session(global, &args.zone).await?;
    session.refresh().await;

    let today = chrono::Utc::now()
        .with_timezone(&session.timezone())
        .date_naive();
    let from = args.from.unwrap_or(today);
    let to = args.to.unwrap_or(from + Duration::days(365));
    if to < from {
        return Err(AppError::generic(format!(
            "Invalid range: {} is after {}",
            from, to
        )));
    }

    let periods = session.periods_overlapping(from, to).await;
    info!(
        "{} periods overlap [{}, {}] for zone {}",
        periods.len(),
        from,
        to,
        session.zone()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&periods)?);
        return Ok(());
    }

    if periods.is_empty() {
        println!("No holiday periods between {} and {}", from, to);
    } else {
        for period in periods {
            println!("{}  {} to {}", period.name, period.start, period.end);
        }
    }
    Ok(())
}

/// Handle cache management commands
pub async fn handle_cache(global: &GlobalArgs, args: CacheArgs) -> Result<()> {
    let config = AppConfig::load(global.config.clone()).await?;
    let storage_root = global
        .cache_dir
        .clone()
        .or_else(|| config.storage_root())
        .ok_or_else(|| AppError::generic("No cache directory configured"))?;
    let cache_dir: PathBuf = storage_root.join(cache_constants::CACHE_DIR_NAME);

    match args.action {
        CacheAction::Info => {
            println!("Cache directory: {}", cache_dir.display());
            if !cache_dir.exists() {
                println!("(empty - no cache directory yet)");
                return Ok(());
            }
            let mut entries = tokio::fs::read_dir(&cache_dir).await?;
            let mut count = 0usize;
            while let Some(entry) = entries.next_entry().await? {
                let metadata = entry.metadata().await?;
                let age = metadata
                    .modified()
                    .ok()
                    .and_then(|m| m.elapsed().ok())
                    .map(|d| d.as_secs() / 86_400);
                match age {
                    Some(days) => println!(
                        "  {}  ({} bytes, {} day(s) old)",
                        entry.file_name().to_string_lossy(),
                        metadata.len(),
                        days
                    ),
                    None => println!(
                        "  {}  ({} bytes)",
                        entry.file_name().to_string_lossy(),
                        metadata.len()
                    ),
                }
                count += 1;
            }
            if count == 0 {
                println!("(no cached payloads)");
            }
        }
        CacheAction::Clear => {
            if cache_dir.exists() {
                tokio::fs::remove_dir_all(&cache_dir).await?;
                println!("Cleared cache at {}", cache_dir.display());
            } else {
                println!("Nothing to clear at {}", cache_dir.display());
            }
        }
    }
    Ok(())
}
