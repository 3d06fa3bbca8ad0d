use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use sw_alert::{LogNotifier, Notifier, ProximityMonitor};
use sw_core::{DistanceUnit, GeoPoint, Timestamp, distance_in, distances_km, nearest};
use sw_feed::{FeedKind, GroundTrackSource, PositionSource, SimulatedTime, payload};
use sw_store::{CsvStore, MemoryStore, RecordStore};
use sw_tracker::{LogObserver, TrackerBuilder};
use tracing::info;

use crate::cli::{HistoryArgs, TrackArgs};
use crate::config::{AppConfig, StoreKind};

// ── distance ──────────────────────────────────────────────────────────────────

pub fn distance(a: GeoPoint, b: GeoPoint, unit: DistanceUnit) -> Result<String> {
    let d = distance_in(a, b, unit)?;
    Ok(format!("{d:.3} {unit}"))
}

// ── track ─────────────────────────────────────────────────────────────────────

pub fn track(mut config: AppConfig, args: &TrackArgs) -> Result<()> {
    args.apply(&mut config);

    let store = open_store(config.store, &config.out_dir)?;
    let source = open_source(&config, args.offline)?;
    info!(source = source.name(), store = ?config.store, out = %config.out_dir.display(), "starting tracker");

    let mut builder = TrackerBuilder::new(config.poll.clone(), source, store);
    if config.alerts_enabled {
        let notifier: Box<dyn Notifier + Send> = Box::new(LogNotifier);
        let monitor = ProximityMonitor::new(config.alert, config.policy, notifier)
            .context("invalid alert settings")?;
        builder = builder.monitor(monitor);
    }
    if args.no_wait {
        // Simulated time still moves one interval per poll.
        let start = config.poll.start_unix_secs.map_or_else(Timestamp::now, Timestamp);
        let time = SimulatedTime::starting_at(start);
        builder = builder.pacer(time.clone()).wall_clock(time);
    }

    let mut tracker = builder.build()?;
    tracker.run(&mut LogObserver)?;
    Ok(())
}

fn open_source(config: &AppConfig, offline: bool) -> Result<Box<dyn PositionSource>> {
    if offline {
        return Ok(Box::new(GroundTrackSource::new(config.orbit.clone())));
    }
    live_source(config)
}

#[cfg(feature = "http")]
fn live_source(config: &AppConfig) -> Result<Box<dyn PositionSource>> {
    use sw_feed::{FailoverFeed, HttpSource, http::build_client};

    let client = build_client()?;
    let primary = HttpSource::new(client.clone(), FeedKind::Primary, &config.primary_url);
    let fallback = HttpSource::new(client, FeedKind::Fallback, &config.fallback_url);
    Ok(Box::new(FailoverFeed::new(primary, fallback, config.failover.clone())))
}

#[cfg(not(feature = "http"))]
fn live_source(_config: &AppConfig) -> Result<Box<dyn PositionSource>> {
    bail!("built without the `http` feature; pass --offline to use the ground-track model")
}

fn open_store(kind: StoreKind, dir: &Path) -> Result<Box<dyn RecordStore>> {
    let store: Box<dyn RecordStore> = match kind {
        StoreKind::Memory => Box::new(MemoryStore::new()),
        StoreKind::Csv => Box::new(
            CsvStore::open(dir).with_context(|| format!("failed to open CSV store in {}", dir.display()))?,
        ),
        StoreKind::Sqlite => open_sqlite(dir)?,
    };
    Ok(store)
}

#[cfg(feature = "sqlite")]
fn open_sqlite(dir: &Path) -> Result<Box<dyn RecordStore>> {
    let store = sw_store::SqliteStore::open(dir)
        .with_context(|| format!("failed to open SQLite store in {}", dir.display()))?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_dir: &Path) -> Result<Box<dyn RecordStore>> {
    bail!("built without the `sqlite` feature")
}

// ── history ───────────────────────────────────────────────────────────────────

pub fn history(mut config: AppConfig, args: &HistoryArgs) -> Result<String> {
    args.store.apply(&mut config);
    if config.store == StoreKind::Memory {
        bail!("the memory store keeps nothing between runs; use --store csv or sqlite");
    }
    let home = args.home.point()?;
    let store = open_store(config.store, &config.out_dir)?;

    if args.sightings {
        let rows = store.recent_sightings(args.limit)?;
        if args.json {
            return Ok(serde_json::to_string_pretty(&rows)?);
        }
        let mut out = String::from("timestamp             iss_lat    iss_lon     distance_km\n");
        for r in &rows {
            out.push_str(&format!(
                "{}  {:>9.4} {:>10.4}  {:>10.1}\n",
                r.timestamp, r.iss_latitude, r.iss_longitude, r.distance_km
            ));
        }
        return Ok(out);
    }

    let rows = store.recent_positions(args.limit)?;
    if args.json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let points: Vec<GeoPoint> = rows.iter().map(|r| r.point()).collect();
    let distances = match home {
        Some(home) => Some(distances_km(home, &points).context("invalid home location")?),
        None => None,
    };

    let mut out = String::from("timestamp             latitude   longitude   altitude_km");
    if distances.is_some() {
        out.push_str("  from_home_km");
    }
    out.push('\n');
    for (i, r) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{}  {:>9.4} {:>10.4}  {:>11.1}",
            r.timestamp, r.latitude, r.longitude, r.altitude_km
        ));
        if let Some(d) = &distances {
            out.push_str(&format!("  {:>12.1}", d[i]));
        }
        out.push('\n');
    }

    if let Some(home) = home {
        if let Some((i, d)) = nearest(home, &points)? {
            out.push_str(&format!("closest: {} at {d:.1} km\n", rows[i].timestamp));
        }
    }
    Ok(out)
}

// ── parse ─────────────────────────────────────────────────────────────────────

pub fn parse(kind: FeedKind, file: &Path) -> Result<String> {
    let body = fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let position = payload::parse(kind, &body).with_context(|| format!("failed to decode {}", file.display()))?;
    Ok(serde_json::to_string_pretty(&position)?)
}
