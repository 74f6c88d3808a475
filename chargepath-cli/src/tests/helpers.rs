//! Test helpers for staging request files and stubbing planner services.

use super::*;
use crate::plan::PlanArgs;
use crate::services::{PlanServicesBuilder, RoutingConfig, StationServiceConfig};
use camino::{Utf8Path, Utf8PathBuf};
use chargepath_core::test_support::{StubRouteProvider, StubStationDirectory};
use chargepath_core::{BatteryState, PlanRequest, RouteProvider, StationDirectory, Trip};
use geo::Coord;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub(super) const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };
pub(super) const DESTINATION: Coord<f64> = Coord { x: 4.0, y: 0.0 };

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding the request file of one test.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write a request from [`ORIGIN`] to [`DESTINATION`] at `percent` charge.
    pub(super) fn write_request(&self, percent: f64) -> Utf8PathBuf {
        let request = PlanRequest {
            trip: Trip::new(ORIGIN, DESTINATION),
            battery: BatteryState::new(percent).expect("valid battery"),
        };
        let path = self.path("request.json");
        let payload = serde_json::to_string_pretty(&request).expect("serialise request");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

/// Plan arguments with every required service option filled in.
pub(super) fn plan_args(request_path: Utf8PathBuf) -> PlanArgs {
    PlanArgs {
        request_path: Some(request_path),
        stations_url: Some("https://stations.example.com/search".to_owned()),
        login_url: Some("https://stations.example.com/login".to_owned()),
        username: Some("driver".to_owned()),
        password: Some("hunter2".to_owned()),
        ..PlanArgs::default()
    }
}

/// Services backed by the core stubs, recording the configs they were built from.
pub(super) struct StubServices {
    pub(super) routes: Arc<StubRouteProvider>,
    pub(super) stations: Arc<StubStationDirectory>,
    pub(super) routing_configs: Mutex<Vec<RoutingConfig>>,
    pub(super) station_configs: Mutex<Vec<StationServiceConfig>>,
}

impl StubServices {
    pub(super) fn new(routes: StubRouteProvider, stations: StubStationDirectory) -> Self {
        Self {
            routes: Arc::new(routes),
            stations: Arc::new(stations),
            routing_configs: Mutex::new(Vec::new()),
            station_configs: Mutex::new(Vec::new()),
        }
    }
}

impl PlanServicesBuilder for StubServices {
    fn route_provider(&self, config: &RoutingConfig) -> Result<Arc<dyn RouteProvider>, CliError> {
        self.routing_configs
            .lock()
            .expect("routing configs lock")
            .push(config.clone());
        Ok(self.routes.clone())
    }

    fn station_directory(
        &self,
        config: &StationServiceConfig,
    ) -> Result<Arc<dyn StationDirectory>, CliError> {
        self.station_configs
            .lock()
            .expect("station configs lock")
            .push(config.clone());
        Ok(self.stations.clone())
    }
}
