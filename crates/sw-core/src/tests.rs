//! Unit tests for sw-core primitives.

#[cfg(test)]
mod geo {
    use crate::{
        Axis, DistanceUnit, GeoError, GeoPoint, MAX_DISTANCE_KM, PointRole, distance_in,
        distance_km,
    };

    fn km(a: (f64, f64), b: (f64, f64)) -> f64 {
        distance_km(a.into(), b.into()).unwrap()
    }

    /// Coarse grid over the whole valid domain, bounds included.
    fn grid() -> Vec<GeoPoint> {
        let lats = [-90.0, -63.3, -45.0, -0.5, 0.0, 12.25, 45.0, 89.9, 90.0];
        let lons = [-180.0, -135.0, -73.9, 0.0, 0.1, 45.0, 120.7, 179.99, 180.0];
        lats.iter()
            .flat_map(|&lat| lons.iter().map(move |&lon| GeoPoint::new(lat, lon)))
            .collect()
    }

    #[test]
    fn same_point_is_exactly_zero() {
        for p in grid() {
            assert_eq!(distance_km(p, p).unwrap(), 0.0, "at {p}");
        }
        let atlanta = GeoPoint::new(33.7490, -84.3880);
        assert_eq!(atlanta.distance_km(atlanta).unwrap(), 0.0);
    }

    #[test]
    fn symmetric() {
        let pts = grid();
        for &a in &pts {
            for &b in &pts {
                assert_eq!(distance_km(a, b).unwrap(), distance_km(b, a).unwrap(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn bounded_by_half_circumference() {
        let pts = grid();
        for &a in &pts {
            for &b in &pts {
                let d = distance_km(a, b).unwrap();
                assert!((0.0..=MAX_DISTANCE_KM).contains(&d), "{a} vs {b}: {d}");
            }
        }
    }

    #[test]
    fn pole_to_pole() {
        let d = km((90.0, 0.0), (-90.0, 0.0));
        assert!((d - 20_015.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn equatorial_half_circumference() {
        // π · 6371 km; the sphere has no equatorial bulge.
        let d = km((0.0, 0.0), (0.0, 180.0));
        assert!((d - MAX_DISTANCE_KM).abs() < 1e-6, "got {d}");
        assert!((d - 20_015.09).abs() < 0.01, "got {d}");
    }

    #[test]
    fn new_york_to_london() {
        let d = km((40.7128, -74.0060), (51.5074, -0.1278));
        assert!((d - 5_570.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn atlanta_short_hop() {
        let d = km((33.7490, -84.3880), (34.0522, -84.0733));
        assert!((d - 44.50).abs() < 0.1, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = km((30.0, -88.0), (31.0, -88.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn latitude_out_of_range() {
        let err = distance_km(GeoPoint::new(91.0, 0.0), GeoPoint::new(0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            GeoError::InvalidCoordinate { point: PointRole::First, axis: Axis::Latitude, value: 91.0 }
        );
    }

    #[test]
    fn longitude_out_of_range() {
        let err = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 181.0)).unwrap_err();
        assert_eq!(
            err,
            GeoError::InvalidCoordinate { point: PointRole::Second, axis: Axis::Longitude, value: 181.0 }
        );
    }

    #[test]
    fn negative_out_of_range() {
        assert!(distance_km(GeoPoint::new(-90.0001, 0.0), GeoPoint::new(0.0, 0.0)).is_err());
        assert!(distance_km(GeoPoint::new(0.0, -180.5), GeoPoint::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn bounds_are_valid() {
        assert!(distance_km(GeoPoint::new(90.0, 180.0), GeoPoint::new(-90.0, -180.0)).is_ok());
    }

    #[test]
    fn non_finite_rejected() {
        let ok = GeoPoint::new(0.0, 0.0);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(distance_km(GeoPoint::new(bad, 0.0), ok).is_err());
            assert!(distance_km(ok, GeoPoint::new(0.0, bad)).is_err());
        }
    }

    #[test]
    fn latitude_checked_before_longitude() {
        let err = distance_km(GeoPoint::new(95.0, 200.0), GeoPoint::new(0.0, 0.0)).unwrap_err();
        let GeoError::InvalidCoordinate { axis, .. } = err;
        assert_eq!(axis, Axis::Latitude);
    }

    #[test]
    fn try_new_validates() {
        assert!(GeoPoint::try_new(45.0, 90.0).is_ok());
        assert!(GeoPoint::try_new(45.0, 190.0).is_err());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn unit_conversions() {
        let a = GeoPoint::new(33.7490, -84.3880);
        let b = GeoPoint::new(34.0522, -84.0733);
        let k = distance_in(a, b, DistanceUnit::Kilometers).unwrap();
        let mi = distance_in(a, b, DistanceUnit::Miles).unwrap();
        let m = distance_in(a, b, DistanceUnit::Meters).unwrap();
        assert!((k * 0.621371 - mi).abs() < 0.1);
        assert!((k * 1000.0 - m).abs() < 0.1);
    }

    #[test]
    fn unit_parse() {
        assert_eq!("km".parse::<DistanceUnit>().unwrap(), DistanceUnit::Kilometers);
        assert_eq!("Miles".parse::<DistanceUnit>().unwrap(), DistanceUnit::Miles);
        assert_eq!("m".parse::<DistanceUnit>().unwrap(), DistanceUnit::Meters);
        assert!("furlong".parse::<DistanceUnit>().is_err());
    }

    #[test]
    fn error_message_names_point_and_axis() {
        let err = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 181.0)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("longitude"), "{msg}");
        assert!(msg.contains("second point"), "{msg}");
    }

    #[test]
    fn display() {
        assert_eq!(GeoPoint::new(1.5, -2.25).to_string(), "(1.500000, -2.250000)");
    }
}

#[cfg(test)]
mod batch {
    use crate::{GeoPoint, PointRole, GeoError, distance_km, distances_km, nearest};

    #[test]
    fn matches_pairwise() {
        let origin = GeoPoint::new(33.7490, -84.3880);
        let targets = [
            GeoPoint::new(34.0522, -84.0733),
            GeoPoint::new(51.5074, -0.1278),
            GeoPoint::new(-33.86, 151.21),
        ];
        let got = distances_km(origin, &targets).unwrap();
        for (t, d) in targets.iter().zip(&got) {
            assert_eq!(*d, distance_km(origin, *t).unwrap());
        }
    }

    #[test]
    fn reports_first_bad_target() {
        let targets = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 200.0), GeoPoint::new(99.0, 0.0)];
        let err = distances_km(GeoPoint::new(0.0, 0.0), &targets).unwrap_err();
        let GeoError::InvalidCoordinate { point, .. } = err;
        assert_eq!(point, PointRole::Target(1));
    }

    #[test]
    fn nearest_picks_minimum() {
        let origin = GeoPoint::new(0.0, 0.0);
        let targets = [GeoPoint::new(10.0, 0.0), GeoPoint::new(1.0, 1.0), GeoPoint::new(-5.0, 0.0)];
        let (idx, d) = nearest(origin, &targets).unwrap().unwrap();
        assert_eq!(idx, 1);
        assert!(d > 150.0 && d < 160.0, "got {d}");
        assert!(nearest(origin, &[]).unwrap().is_none());
    }
}

#[cfg(test)]
mod ids {
    use crate::{RecordId, SatelliteId};

    #[test]
    fn iss_catalog_number() {
        assert_eq!(SatelliteId::ISS.0, 25_544);
        assert_eq!(SatelliteId::ISS.to_string(), "SatelliteId(25544)");
    }

    #[test]
    fn record_ids_advance() {
        assert_eq!(RecordId(0).next(), RecordId(1));
        assert!(RecordId(3) < RecordId(4));
    }
}

#[cfg(test)]
mod time {
    use crate::{PollClock, PollConfig, PollTick, Timestamp};

    #[test]
    fn clock_maps_ticks_to_wall_time() {
        let mut clock = PollClock::new(1_000, 5);
        assert_eq!(clock.now(), Timestamp(1_000));
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, PollTick(2));
        assert_eq!(clock.now(), Timestamp(1_010));
        assert_eq!(clock.ticks_for_secs(300), 60);
        assert_eq!(clock.ticks_for_secs(1), 1);
    }

    #[test]
    fn rfc3339_round_trip() {
        let ts = Timestamp(1_714_564_800);
        assert_eq!(ts.to_rfc3339(), "2024-05-01T12:00:00Z");
        assert_eq!(Timestamp::parse("2024-05-01T12:00:00Z").unwrap(), ts);
        assert_eq!(Timestamp::parse("2024-05-01T14:00:00+02:00").unwrap(), ts);
    }

    #[test]
    fn naive_timestamp_read_as_utc() {
        let ts = Timestamp::parse("2024-05-01T12:00:00.250").unwrap();
        assert_eq!(ts, Timestamp(1_714_564_800));
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn poll_config_validation() {
        assert!(PollConfig::default().validate().is_ok());
        let bad = PollConfig { interval_secs: 0, ..PollConfig::default() };
        assert!(bad.validate().is_err());
        let bad = PollConfig { history_size: 0, ..PollConfig::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn finite_and_unbounded_runs() {
        let cfg = PollConfig { total_polls: Some(3), ..PollConfig::default() };
        assert!(!cfg.is_finished(PollTick(2)));
        assert!(cfg.is_finished(PollTick(3)));
        assert!(!PollConfig::default().is_finished(PollTick(u64::MAX)));
    }

    #[test]
    fn fixed_start_clock() {
        let cfg = PollConfig { start_unix_secs: Some(42), ..PollConfig::default() };
        let clock = cfg.make_clock();
        assert_eq!(clock.start_unix_secs, 42);
        assert_eq!(clock.interval_secs, 5);
    }
}
