//! Unit tests for the stations subcommand.

use super::helpers::StubServices;
use super::*;
use crate::stations::{StationsArgs, StationsConfig, run_stations_with};
use chargepath_core::test_support::{StubRouteProvider, StubStationDirectory, sample_stations};
use chargepath_core::{AuthError, ChargingStation, StationError};
use geo::Coord;
use rstest::rstest;

const BENGALURU: Coord<f64> = Coord { x: 77.5946, y: 12.9716 };

fn stations_args() -> StationsArgs {
    StationsArgs {
        lat: Some(BENGALURU.y),
        lon: Some(BENGALURU.x),
        stations_url: Some("https://stations.example.com/search".to_owned()),
        login_url: Some("https://stations.example.com/login".to_owned()),
        username: Some("driver".to_owned()),
        password: Some("hunter2".to_owned()),
        ..StationsArgs::default()
    }
}

#[rstest]
#[case::latitude(StationsArgs { lat: None, ..stations_args() }, ARG_LAT, ENV_STATIONS_LAT)]
#[case::longitude(StationsArgs { lon: None, ..stations_args() }, ARG_LON, ENV_STATIONS_LON)]
#[case::username(
    StationsArgs { username: None, ..stations_args() },
    ARG_USERNAME,
    ENV_STATIONS_USERNAME
)]
fn converting_stations_without_required_fields_errors(
    #[case] args: StationsArgs,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let err = StationsConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(91.0, 77.0)]
#[case(12.0, -181.0)]
#[case(f64::NAN, 77.0)]
fn converting_stations_rejects_invalid_coordinates(#[case] lat: f64, #[case] lon: f64) {
    let args = StationsArgs {
        lat: Some(lat),
        lon: Some(lon),
        ..stations_args()
    };

    let err = StationsConfig::try_from(args).expect_err("coordinate should be rejected");
    assert!(
        matches!(err, CliError::InvalidCoordinate { .. }),
        "expected InvalidCoordinate, found {err:?}"
    );
}

#[rstest]
fn stations_config_maps_lat_lon_onto_coordinate() {
    let config = StationsConfig::try_from(stations_args()).expect("config should build");

    assert_eq!(config.location, BENGALURU);
    assert_eq!(config.radius_km, chargepath_core::DEFAULT_SEARCH_RADIUS_KM);
}

#[rstest]
fn run_stations_prints_station_json() {
    let services = StubServices::new(
        StubRouteProvider::new(),
        StubStationDirectory::always(sample_stations(2, BENGALURU)),
    );
    let args = StationsArgs {
        radius_km: Some(15.0),
        ..stations_args()
    };
    let mut buffer = Vec::new();

    run_stations_with(args, &services, &mut buffer).expect("lookup should succeed");

    let stations: Vec<ChargingStation> =
        serde_json::from_slice(&buffer).expect("output should list stations");
    let ids: Vec<u64> = stations.iter().map(|station| station.id).collect();
    assert_eq!(ids, vec![101, 102]);
    assert_eq!(services.stations.queries(), vec![BENGALURU]);
    assert_eq!(services.stations.radii(), vec![15.0]);
}

#[rstest]
fn run_stations_reports_lookup_failure() {
    let failure = StationError::Auth(AuthError::MissingToken {
        url: "https://stations.example.com/login".to_owned(),
    });
    let services = StubServices::new(
        StubRouteProvider::new(),
        StubStationDirectory::failing(failure.clone()),
    );
    let mut buffer = Vec::new();

    let err = run_stations_with(stations_args(), &services, &mut buffer)
        .expect_err("lookup failure should surface");
    match err {
        CliError::StationLookup { source } => assert_eq!(source, failure),
        other => panic!("expected StationLookup, found {other:?}"),
    }
    assert!(buffer.is_empty());
}
