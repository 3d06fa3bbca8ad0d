//! Unit tests for sw-feed.

#[cfg(test)]
use sw_core::{GeoPoint, Timestamp};

#[cfg(test)]
use crate::{FeedKind, SatellitePosition};

#[cfg(test)]
fn position(at: i64, lat: f64, lon: f64, source: FeedKind) -> SatellitePosition {
    SatellitePosition {
        timestamp:           Timestamp(at),
        point:               GeoPoint::new(lat, lon),
        altitude_km:         420.0,
        footprint_radius_km: 2_250.0,
        source,
    }
}

#[cfg(test)]
mod payload {
    use crate::payload::{FALLBACK_FOOTPRINT_FACTOR, NOMINAL_ALTITUDE_KM, parse};
    use crate::{FeedError, FeedKind, parse_fallback, parse_primary};

    const PRIMARY: &str = r#"{
        "name": "iss", "id": 25544,
        "latitude": 50.11496269845, "longitude": 118.07900427317,
        "altitude": 408.05526028199, "velocity": 27635.971970874,
        "visibility": "daylight", "footprint": 4446.1877699772,
        "timestamp": 1714564800, "daynum": 2460432.0,
        "solar_lat": 15.0, "solar_lon": 0.0, "units": "kilometers"
    }"#;

    const FALLBACK: &str = r#"{
        "message": "success", "timestamp": 1714564805,
        "iss_position": {"latitude": "-12.5000", "longitude": "45.2500"}
    }"#;

    #[test]
    fn primary_fields() {
        let p = parse_primary(PRIMARY).unwrap();
        assert_eq!(p.timestamp.0, 1_714_564_800);
        assert!((p.point.lat - 50.11496269845).abs() < 1e-12);
        assert!((p.point.lon - 118.07900427317).abs() < 1e-12);
        assert!((p.altitude_km - 408.055).abs() < 1e-3);
        assert!((p.footprint_radius_km - 4446.1877699772 / 2.0).abs() < 1e-9);
        assert_eq!(p.source, FeedKind::Primary);
    }

    #[test]
    fn primary_in_miles_converted() {
        let body = r#"{"latitude": 1.0, "longitude": 2.0, "altitude": 250.0,
                       "footprint": 2800.0, "timestamp": 10, "units": "miles"}"#;
        let p = parse_primary(body).unwrap();
        assert!((p.altitude_km - 402.336).abs() < 1e-6);
        assert!((p.footprint_radius_km - 1400.0 * 1.609344).abs() < 1e-6);
    }

    #[test]
    fn primary_rejects_other_satellite() {
        let body = PRIMARY.replace("25544", "20580");
        assert!(matches!(parse_primary(&body), Err(FeedError::Payload(_))));
    }

    #[test]
    fn primary_rejects_bad_coordinates() {
        let body = r#"{"latitude": 95.0, "longitude": 2.0, "altitude": 400.0,
                       "footprint": 4000.0, "timestamp": 10}"#;
        assert!(matches!(parse_primary(body), Err(FeedError::Coordinate(_))));
    }

    #[test]
    fn primary_rejects_negative_footprint() {
        let body = r#"{"latitude": 5.0, "longitude": 2.0, "altitude": 400.0,
                       "footprint": -1.0, "timestamp": 10}"#;
        assert!(matches!(parse_primary(body), Err(FeedError::Payload(_))));
    }

    #[test]
    fn primary_missing_field_is_json_error() {
        let body = r#"{"latitude": 5.0, "longitude": 2.0, "timestamp": 10}"#;
        assert!(matches!(parse_primary(body), Err(FeedError::Json(_))));
    }

    #[test]
    fn fallback_fields() {
        let p = parse_fallback(FALLBACK).unwrap();
        assert_eq!(p.timestamp.0, 1_714_564_805);
        assert_eq!(p.point.lat, -12.5);
        assert_eq!(p.point.lon, 45.25);
        assert_eq!(p.altitude_km, NOMINAL_ALTITUDE_KM);
        assert!((p.footprint_radius_km - 408.0 * FALLBACK_FOOTPRINT_FACTOR).abs() < 1e-9);
        assert_eq!(p.source, FeedKind::Fallback);
    }

    #[test]
    fn fallback_failure_message() {
        let body = FALLBACK.replace("success", "failure");
        assert!(matches!(parse_fallback(&body), Err(FeedError::Payload(_))));
    }

    #[test]
    fn fallback_non_numeric_coordinate() {
        let body = FALLBACK.replace("-12.5000", "south-ish");
        assert!(matches!(parse_fallback(&body), Err(FeedError::Payload(_))));
    }

    #[test]
    fn fallback_out_of_range() {
        let body = FALLBACK.replace("45.2500", "181.0");
        assert!(matches!(parse_fallback(&body), Err(FeedError::Coordinate(_))));
    }

    #[test]
    fn dispatch_by_kind() {
        assert_eq!(parse(FeedKind::Primary, PRIMARY).unwrap().source, FeedKind::Primary);
        assert_eq!(parse(FeedKind::Fallback, FALLBACK).unwrap().source, FeedKind::Fallback);
        assert!(parse(FeedKind::Cache, PRIMARY).is_err());
    }
}

#[cfg(test)]
mod retry {
    use std::time::Duration;

    use crate::{FeedError, NoSleep, RetryPolicy};

    #[test]
    fn exponential_delays() {
        let p = RetryPolicy::default();
        assert_eq!(p.base_delay(0), Duration::from_secs(1));
        assert_eq!(p.base_delay(1), Duration::from_secs(2));
        assert_eq!(p.base_delay(2), Duration::from_secs(4));
    }

    #[test]
    fn succeeds_after_failures() {
        let p = RetryPolicy::default();
        let mut sleeper = NoSleep::default();
        let mut rng = p.make_rng();
        let result = p.run("test", &mut sleeper, &mut rng, |attempt| {
            if attempt < 2 { Err(FeedError::Payload("flaky".into())) } else { Ok(attempt) }
        });
        assert_eq!(result.unwrap(), 2);
        assert_eq!(sleeper.requested, vec![Duration::from_secs(1), Duration::from_secs(2)]);
    }

    #[test]
    fn exhausted_wraps_last_error() {
        let p = RetryPolicy::default();
        let mut sleeper = NoSleep::default();
        let mut rng = p.make_rng();
        let mut calls = 0;
        let result: Result<(), _> = p.run("primary", &mut sleeper, &mut rng, |attempt| {
            calls += 1;
            Err(FeedError::Payload(format!("attempt {attempt}")))
        });
        assert_eq!(calls, 3);
        // No pause after the final attempt.
        assert_eq!(sleeper.requested.len(), 2);
        match result.unwrap_err() {
            FeedError::RetriesExhausted { source_name, attempts, last } => {
                assert_eq!(source_name, "primary");
                assert_eq!(attempts, 3);
                assert!(last.to_string().contains("attempt 2"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn zero_attempts_means_one() {
        let p = RetryPolicy { attempts: 0, ..RetryPolicy::default() };
        let mut sleeper = NoSleep::default();
        let mut rng = p.make_rng();
        let mut calls = 0;
        let _ = p.run("x", &mut sleeper, &mut rng, |_| -> Result<(), _> {
            calls += 1;
            Err(FeedError::Payload("no".into()))
        });
        assert_eq!(calls, 1);
        assert!(sleeper.requested.is_empty());
    }

    #[test]
    fn jitter_stays_in_band_and_is_seeded() {
        let p = RetryPolicy { jitter: 0.5, seed: 7, ..RetryPolicy::default() };
        let mut a = p.make_rng();
        let mut b = p.make_rng();
        for attempt in 0..3 {
            let da = p.delay(attempt, &mut a);
            let db = p.delay(attempt, &mut b);
            assert_eq!(da, db);
            let base = p.base_delay(attempt);
            assert!(da >= base && da <= base.mul_f64(1.5), "{da:?} vs {base:?}");
        }
    }

    #[test]
    fn simulated_time_moves_with_retry_pauses() {
        use sw_core::{Timestamp, WallClock};

        use crate::{SimulatedTime, Sleeper};

        let time = SimulatedTime::starting_at(Timestamp(1_000));
        let mut pacer = time.clone();
        let p = RetryPolicy::default();
        let mut rng = p.make_rng();
        let _ = p.run("primary", &mut pacer, &mut rng, |_| -> Result<(), _> {
            Err(FeedError::Payload("down".into()))
        });
        // 1 s + 2 s of backoff, seen through the shared clone.
        assert_eq!(time.now(), Timestamp(1_003));

        pacer.sleep(Duration::from_millis(600));
        assert_eq!(time.now(), Timestamp(1_003));
        time.advance(Duration::from_millis(400));
        assert_eq!(time.now(), Timestamp(1_004));
    }
}

#[cfg(test)]
mod failover {
    use sw_core::Timestamp;

    use super::position;
    use crate::{
        FailoverConfig, FailoverFeed, FeedError, FeedKind, NoSleep, PositionSource, ScriptedSource,
    };

    fn down(name: &str) -> FeedError {
        FeedError::Payload(format!("{name} down"))
    }

    fn feed(primary: ScriptedSource, fallback: ScriptedSource) -> FailoverFeed<ScriptedSource, ScriptedSource> {
        FailoverFeed::new(primary, fallback, FailoverConfig::default()).with_sleeper(NoSleep::default())
    }

    #[test]
    fn healthy_primary_used_directly() {
        let primary = ScriptedSource::new("primary").then_ok(position(100, 1.0, 2.0, FeedKind::Primary));
        let fallback = ScriptedSource::new("fallback");
        let mut f = feed(primary, fallback);

        let p = f.fetch(Timestamp(100)).unwrap();
        assert_eq!(p.source, FeedKind::Primary);
        assert_eq!(f.fallback().calls, 0);
        assert!(f.primary_healthy());
    }

    #[test]
    fn retries_before_falling_back() {
        let primary = ScriptedSource::new("primary")
            .then_err(down("primary"))
            .then_err(down("primary"))
            .then_err(down("primary"));
        let fallback = ScriptedSource::new("fallback").then_ok(position(100, 3.0, 4.0, FeedKind::Fallback));
        let mut f = feed(primary, fallback);

        let p = f.fetch(Timestamp(100)).unwrap();
        assert_eq!(p.source, FeedKind::Fallback);
        assert_eq!(f.primary().calls, 3);
        assert!(!f.primary_healthy());
    }

    #[test]
    fn recovers_within_retry_budget() {
        let primary = ScriptedSource::new("primary")
            .then_err(down("primary"))
            .then_ok(position(100, 1.0, 2.0, FeedKind::Primary));
        let mut f = FailoverFeed::new(primary, ScriptedSource::new("fallback"), FailoverConfig::default())
            .with_sleeper(NoSleep::default());

        assert_eq!(f.fetch(Timestamp(100)).unwrap().source, FeedKind::Primary);
        assert!(f.primary_healthy());
        assert_eq!(f.primary().calls, 2);
    }

    #[test]
    fn unhealthy_primary_replays_fresh_cache() {
        let primary = ScriptedSource::new("primary")
            .then_err(down("primary"))
            .then_err(down("primary"))
            .then_err(down("primary"));
        let fallback = ScriptedSource::new("fallback").then_ok(position(100, 3.0, 4.0, FeedKind::Fallback));
        let mut f = feed(primary, fallback);
        f.fetch(Timestamp(100)).unwrap();

        // 10 s later: primary not due for a probe, cache is fresh.
        let p = f.fetch(Timestamp(110)).unwrap();
        assert_eq!(p.source, FeedKind::Cache);
        assert_eq!(p.point.lat, 3.0);
        assert_eq!(f.primary().calls, 3);
        assert_eq!(f.fallback().calls, 1);
    }

    #[test]
    fn stale_cache_goes_to_fallback() {
        let config = FailoverConfig { health_check_secs: 3_600, ..FailoverConfig::default() };
        let primary = ScriptedSource::new("primary")
            .then_err(down("primary"))
            .then_err(down("primary"))
            .then_err(down("primary"));
        let fallback = ScriptedSource::new("fallback")
            .then_ok(position(100, 3.0, 4.0, FeedKind::Fallback))
            .then_ok(position(500, 5.0, 6.0, FeedKind::Fallback));
        let mut f = FailoverFeed::new(primary, fallback, config).with_sleeper(NoSleep::default());
        f.fetch(Timestamp(100)).unwrap();

        // 400 s later the cached fix is older than 5 min.
        let p = f.fetch(Timestamp(500)).unwrap();
        assert_eq!(p.source, FeedKind::Fallback);
        assert_eq!(p.point.lat, 5.0);
        assert_eq!(f.primary().calls, 3);
    }

    #[test]
    fn primary_probed_again_after_health_interval() {
        let primary = ScriptedSource::new("primary")
            .then_err(down("primary"))
            .then_err(down("primary"))
            .then_err(down("primary"))
            .then_ok(position(160, 7.0, 8.0, FeedKind::Primary));
        let fallback = ScriptedSource::new("fallback").then_ok(position(100, 3.0, 4.0, FeedKind::Fallback));
        let mut f = feed(primary, fallback);
        f.fetch(Timestamp(100)).unwrap();

        let p = f.fetch(Timestamp(160)).unwrap();
        assert_eq!(p.source, FeedKind::Primary);
        assert!(f.primary_healthy());
        assert_eq!(f.cached().unwrap().point.lat, 7.0);
    }

    #[test]
    fn everything_down_without_cache() {
        let primary = ScriptedSource::new("primary");
        let fallback = ScriptedSource::new("fallback");
        let mut f = feed(primary, fallback);

        match f.fetch(Timestamp(0)).unwrap_err() {
            FeedError::AllSourcesFailed { primary, fallback } => {
                assert!(matches!(*primary, FeedError::RetriesExhausted { .. }));
                assert!(matches!(*fallback, FeedError::Exhausted { .. }));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn everything_down_with_fresh_cache_replays() {
        let primary = ScriptedSource::new("primary").then_ok(position(100, 1.0, 2.0, FeedKind::Primary));
        let mut f = feed(primary, ScriptedSource::new("fallback"));
        f.fetch(Timestamp(100)).unwrap();

        // Primary script is now empty: it fails three times, fallback fails too.
        let p = f.fetch(Timestamp(130)).unwrap();
        assert_eq!(p.source, FeedKind::Cache);
        assert_eq!(p.point.lat, 1.0);
    }
}

#[cfg(test)]
mod ground_track {
    use sw_core::Timestamp;

    use crate::ground_track::{ISS_INCLINATION_DEG, ISS_PERIOD_SECS};
    use crate::{FeedKind, GroundTrackSource, OrbitParams, PositionSource};

    #[test]
    fn starts_at_ascending_node() {
        let orbit = OrbitParams::default();
        let p = orbit.point_at(Timestamp::EPOCH);
        assert!(p.lat.abs() < 1e-9);
        assert!(p.lon.abs() < 1e-9);
    }

    #[test]
    fn peaks_at_inclination() {
        let orbit = OrbitParams::default();
        let quarter = Timestamp((ISS_PERIOD_SECS / 4.0).round() as i64);
        let p = orbit.point_at(quarter);
        assert!((p.lat - ISS_INCLINATION_DEG).abs() < 0.01, "got {}", p.lat);
    }

    #[test]
    fn always_valid_and_drifts_west() {
        let orbit = OrbitParams::default();
        for minute in 0..(24 * 60) {
            let p = orbit.point_at(Timestamp(minute * 60));
            assert!(p.is_valid(), "{p} at minute {minute}");
            assert!(p.lat.abs() <= ISS_INCLINATION_DEG + 1e-9);
        }
        // After one full orbit the track has moved west by Earth's rotation.
        let one_orbit = Timestamp(ISS_PERIOD_SECS.round() as i64);
        let p = orbit.point_at(one_orbit);
        assert!(p.lon < -22.0 && p.lon > -25.0, "got {}", p.lon);
    }

    #[test]
    fn footprint_is_horizon_circle() {
        let r = OrbitParams::default().footprint_radius_km();
        assert!(r > 2_200.0 && r < 2_260.0, "got {r}");
    }

    #[test]
    fn source_labels_synthetic() {
        let mut src = GroundTrackSource::default();
        let p = src.fetch(Timestamp(600)).unwrap();
        assert_eq!(p.source, FeedKind::Synthetic);
        assert_eq!(p.timestamp, Timestamp(600));
    }
}
