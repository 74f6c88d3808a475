#![expect(
    clippy::expect_used,
    reason = "property tests use expect for readable failures"
)]
#![expect(
    clippy::float_arithmetic,
    reason = "the reference model accumulates distances"
)]

//! Property-based tests for the charging-stop planner.
//!
//! # Invariants tested
//!
//! - **Decision:** charging is needed exactly when the route is longer than
//!   the current range, and a plan that needs none carries no stops.
//! - **Scan order:** station lookups happen at the same points as a
//!   sequential reference scan over the segments.
//! - **Candidate cap:** no threshold contributes more stops than the vehicle's
//!   candidate limit, and stops keep the directory's order.
//! - **Warnings:** the no-stations warning appears exactly when charging is
//!   needed and no stop was found.
//! - **Idempotence:** planning the same trip twice against the same
//!   collaborators yields equal plans.

use std::time::Duration;

use geo::Coord;
use proptest::prelude::*;
use chargepath_core::test_support::{StubRouteProvider, StubStationDirectory, sample_stations};
use chargepath_core::{
    BatteryState, NO_STATIONS_WARNING, RouteGeometry, RoutePlan, RoutePlanner, Segment, Trip,
    VehicleParams,
};

const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };
const DESTINATION: Coord<f64> = Coord { x: 9.0, y: 0.0 };

fn route_from_lengths(lengths: &[u16]) -> RouteGeometry {
    let mut travelled = 0.0;
    let segments = lengths
        .iter()
        .map(|&length| {
            let distance_km = f64::from(length);
            travelled += distance_km;
            Segment {
                distance_km,
                duration: Duration::from_secs(u64::from(length) * 60),
                end: Coord {
                    x: travelled / 100.0,
                    y: 0.0,
                },
            }
        })
        .collect();
    RouteGeometry::from_segments(segments)
}

/// Search points a sequential scan visits when every lookup finds stations.
fn reference_search_points(route: &RouteGeometry, threshold_km: f64) -> Vec<Coord<f64>> {
    let mut accumulated = 0.0;
    let mut points = Vec::new();
    for segment in &route.segments {
        accumulated += segment.distance_km;
        if accumulated >= threshold_km {
            points.push(segment.end);
            accumulated = 0.0;
        }
    }
    points
}

fn plan_with(
    route: RouteGeometry,
    battery_percent: u8,
    directory: StubStationDirectory,
) -> (RoutePlan, Vec<Coord<f64>>) {
    let routes = StubRouteProvider::new().with_route(ORIGIN, DESTINATION, Ok(route));
    let planner = RoutePlanner::new(routes, directory);
    let battery = BatteryState::new(f64::from(battery_percent)).expect("valid battery");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build");
    let plan = runtime
        .block_on(planner.plan(
            &Trip::new(ORIGIN, DESTINATION),
            battery,
            &VehicleParams::default(),
        ))
        .expect("planning should succeed");
    (plan, planner.stations().queries())
}

fn segment_lengths() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1_u16..=120_u16, 1..=20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the charging decision compares route length with range.
    #[test]
    fn decision_matches_range(
        lengths in segment_lengths(),
        battery_percent in 0_u8..=100_u8,
        station_count in 0_u32..=5_u32,
    ) {
        let route = route_from_lengths(&lengths);
        let total_km = route.total_distance_km;
        let directory = StubStationDirectory::always(sample_stations(station_count, ORIGIN));
        let (plan, queries) = plan_with(route, battery_percent, directory);

        prop_assert_eq!(plan.needs_charging, total_km > plan.current_range_km);
        if !plan.needs_charging {
            prop_assert!(plan.stops.is_empty());
            prop_assert!(plan.warnings.is_empty());
            prop_assert!(queries.is_empty());
        }
    }

    /// Property: lookups follow the sequential reference scan.
    #[test]
    fn lookups_follow_reference_scan(
        lengths in segment_lengths(),
        battery_percent in 1_u8..=100_u8,
    ) {
        let route = route_from_lengths(&lengths);
        let vehicle = VehicleParams::default();
        let range_km = BatteryState::new(f64::from(battery_percent))
            .expect("valid battery")
            .current_range_km(&vehicle);
        let expected = if route.total_distance_km > range_km {
            reference_search_points(&route, vehicle.search_threshold_km(range_km))
        } else {
            Vec::new()
        };
        let directory = StubStationDirectory::always(sample_stations(2, ORIGIN));
        let (_, queries) = plan_with(route, battery_percent, directory);

        prop_assert_eq!(queries, expected);
    }

    /// Property: each lookup contributes at most the candidate limit, in order.
    #[test]
    fn stops_respect_candidate_cap(
        lengths in segment_lengths(),
        battery_percent in 1_u8..=100_u8,
        station_count in 1_u32..=6_u32,
    ) {
        let stations = sample_stations(station_count, ORIGIN);
        let limit = VehicleParams::default().max_candidates_per_stop();
        let directory = StubStationDirectory::always(stations.clone());
        let (plan, queries) = plan_with(route_from_lengths(&lengths), battery_percent, directory);

        let per_lookup: Vec<u64> = stations.iter().take(limit).map(|station| station.id).collect();
        prop_assert_eq!(plan.stops.len(), queries.len() * per_lookup.len());
        for (chunk, _) in plan.stops.chunks(per_lookup.len().max(1)).zip(&queries) {
            let ids: Vec<u64> = chunk.iter().map(|stop| stop.station.id).collect();
            prop_assert_eq!(&ids, &per_lookup);
        }
    }

    /// Property: the no-stations warning flags exactly the stopless plans
    /// that need charging.
    #[test]
    fn warning_flags_missing_stops(
        lengths in segment_lengths(),
        battery_percent in 0_u8..=100_u8,
        station_count in 0_u32..=3_u32,
    ) {
        let directory = StubStationDirectory::always(sample_stations(station_count, ORIGIN));
        let (plan, _) = plan_with(route_from_lengths(&lengths), battery_percent, directory);

        let expect_warning = plan.needs_charging && plan.stops.is_empty();
        prop_assert_eq!(plan.warnings.contains(NO_STATIONS_WARNING), expect_warning);
        prop_assert!(plan.warnings.len() <= 1);
    }

    /// Property: repeated planning with deterministic collaborators agrees.
    #[test]
    fn planning_is_idempotent(
        lengths in segment_lengths(),
        battery_percent in 0_u8..=100_u8,
        station_count in 0_u32..=5_u32,
    ) {
        let route = route_from_lengths(&lengths);
        let stations = sample_stations(station_count, ORIGIN);
        let (plan_a, queries_a) = plan_with(
            route.clone(),
            battery_percent,
            StubStationDirectory::always(stations.clone()),
        );
        let (plan_b, queries_b) = plan_with(
            route,
            battery_percent,
            StubStationDirectory::always(stations),
        );

        prop_assert_eq!(plan_a, plan_b);
        prop_assert_eq!(queries_a, queries_b);
    }
}
