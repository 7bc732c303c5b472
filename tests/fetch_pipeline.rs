//! End-to-end tests for the fetch fallback chain
//!
//! These tests run the real session against an endpoint that refuses
//! connections, exercising the cache and static fallbacks without
//! touching the network.

use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;

use vacances_scolaires::app::{
    parse_periods, CacheConfig, CacheStore, ClientConfig, DataSource, Session, SessionOptions,
    Zone,
};

/// TCP discard port: connections are refused immediately
const UNREACHABLE_URL: &str = "http://127.0.0.1:9/records";

fn offline_options(zone: &str, storage_root: Option<&std::path::Path>) -> SessionOptions {
    SessionOptions {
        storage_root: storage_root.map(|p| p.to_path_buf()),
        client: ClientConfig {
            records_url: UNREACHABLE_URL.to_string(),
            request_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(2),
            ..Default::default()
        },
        ..SessionOptions::new(zone)
    }
}

fn sample_payload() -> serde_json::Value {
    json!({
        "total_count": 2,
        "results": [
            {
                "description": "Vacances d'Hiver",
                "start_date": "2026-02-07",
                "end_date": "2026-02-22",
                "zones": "Zone A",
                "location": "Besançon",
                "population": "-",
            },
            {
                "description": "Vacances de la Toussaint",
                "start_date": "2025-10-18",
                "end_date": "2025-11-02",
                "zones": "Zone A",
                "location": "Besançon",
                "population": "Élèves",
            },
        ]
    })
}

#[tokio::test]
async fn full_fallback_uses_static_data_and_reports_failure() {
    let session = Session::new(offline_options("A", None)).unwrap();

    let success = session.refresh().await;

    assert!(!success);
    assert_eq!(session.source().await, DataSource::Static);
    let periods = session.periods().await;
    assert!(!periods.is_empty());
    assert!(periods.windows(2).all(|w| w[0].start <= w[1].start));
}

#[tokio::test]
async fn cached_payload_served_when_network_unreachable() {
    let tmp = TempDir::new().unwrap();

    // Seed a cache entry the way a previous successful fetch would have
    let store = CacheStore::new(CacheConfig::under_storage_root(tmp.path()));
    store.ensure_dir().await.unwrap();
    let path = store.entry_path("A", "Besançon");
    store.save(&path, &sample_payload()).await;

    let session = Session::new(offline_options("A", Some(tmp.path()))).unwrap();
    let success = session.refresh().await;

    assert!(success);
    assert_eq!(session.source().await, DataSource::Cache);
    let periods = session.periods().await;
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].name, "Vacances de la Toussaint");
}

#[tokio::test]
async fn cache_round_trip_matches_direct_parse() {
    let tmp = TempDir::new().unwrap();
    let store = CacheStore::new(CacheConfig::under_storage_root(tmp.path()));
    store.ensure_dir().await.unwrap();

    let payload = sample_payload();
    let direct = parse_periods(&payload, Zone::A, "Besançon", chrono_tz::Europe::Paris).unwrap();

    let path = store.entry_path("A", "Besançon");
    store.save(&path, &payload).await;
    let reloaded = store.load(&path).await.unwrap();
    let via_cache =
        parse_periods(&reloaded, Zone::A, "Besançon", chrono_tz::Europe::Paris).unwrap();

    assert_eq!(direct, via_cache);
}

#[tokio::test]
async fn refreshes_are_independent_across_sessions() {
    let tmp_a = TempDir::new().unwrap();
    let tmp_b = TempDir::new().unwrap();

    // Only zone A has a cache entry; zone B must degrade to static data
    let store = CacheStore::new(CacheConfig::under_storage_root(tmp_a.path()));
    store.ensure_dir().await.unwrap();
    store
        .save(&store.entry_path("A", "Besançon"), &sample_payload())
        .await;

    let session_a = Session::new(offline_options("A", Some(tmp_a.path()))).unwrap();
    let session_b = Session::new(offline_options("B", Some(tmp_b.path()))).unwrap();

    let (ok_a, ok_b) = tokio::join!(session_a.refresh(), session_b.refresh());

    assert!(ok_a);
    assert!(!ok_b);
    assert_eq!(session_a.source().await, DataSource::Cache);
    assert_eq!(session_b.source().await, DataSource::Static);
}
