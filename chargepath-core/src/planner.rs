//! Decide whether a trip needs charging and, if so, where to stop.
//!
//! The planner fetches the route once, compares its length with the range on
//! the current charge and, when the range falls short, walks the segments in
//! travel order. Each time the distance driven since the last stop reaches
//! `search_fraction * current_range`, it asks the [`StationDirectory`] for
//! candidates near the end of the current segment and evaluates their
//! detours concurrently.
//!
//! Only a failure to obtain the route aborts planning. Station lookups and
//! detour computations that fail shrink the set of proposed stops instead.
//!
//! Every stop resets the distance counter while the threshold stays based on
//! the departure range, so each stop is assumed to restore that range.

use geo::Coord;
use thiserror::Error;

use crate::{
    BatteryState, ChargingStation, ChargingStop, DetourEvaluator, NO_STATIONS_WARNING,
    PlanRequest, RouteError, RouteGeometry, RoutePlan, RouteProvider, StationDirectory, Trip,
    VehicleParams,
};

/// Radius of the station lookup around each search point, in kilometres.
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 50.0;

/// Errors returned by [`RoutePlanner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The trip's route geometry could not be obtained.
    #[error("route unavailable: {source}")]
    RouteUnavailable {
        /// Underlying routing failure.
        #[source]
        source: RouteError,
    },
}

/// Plans charging stops along a trip.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use chargepath_core::test_support::{StubRouteProvider, StubStationDirectory, uniform_route};
/// use chargepath_core::{BatteryState, RoutePlanner, Trip, VehicleParams};
///
/// let trip = Trip::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 0.0 });
/// let routes = StubRouteProvider::new().with_route(
///     trip.origin,
///     trip.destination,
///     Ok(uniform_route(100.0, 50.0)),
/// );
/// let planner = RoutePlanner::new(routes, StubStationDirectory::empty());
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let plan = runtime.block_on(planner.plan(
///     &trip,
///     BatteryState::new(50.0)?,
///     &VehicleParams::default(),
/// ))?;
/// assert!(!plan.needs_charging);
/// assert!(plan.stops.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlanner<R, S> {
    routes: R,
    stations: S,
    search_radius_km: f64,
}

impl<R, S> RoutePlanner<R, S>
where
    R: RouteProvider,
    S: StationDirectory,
{
    /// Create a planner over the given collaborators.
    #[must_use]
    pub const fn new(routes: R, stations: S) -> Self {
        Self {
            routes,
            stations,
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
        }
    }

    /// Override the station lookup radius.
    #[must_use]
    pub const fn with_search_radius_km(mut self, radius_km: f64) -> Self {
        self.search_radius_km = radius_km;
        self
    }

    /// The route provider used for trips and detours.
    #[must_use]
    pub const fn routes(&self) -> &R {
        &self.routes
    }

    /// The station directory queried at each threshold.
    #[must_use]
    pub const fn stations(&self) -> &S {
        &self.stations
    }

    /// Radius of each station lookup, in kilometres.
    #[must_use]
    pub const fn search_radius_km(&self) -> f64 {
        self.search_radius_km
    }

    /// Plan a [`PlanRequest`] for `vehicle`.
    ///
    /// # Errors
    ///
    /// See [`RoutePlanner::plan`].
    pub async fn plan_request(
        &self,
        request: &PlanRequest,
        vehicle: &VehicleParams,
    ) -> Result<RoutePlan, PlanError> {
        self.plan(&request.trip, request.battery, vehicle).await
    }

    /// Plan `trip` departing with `battery` in a vehicle described by
    /// `vehicle`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::RouteUnavailable`] when the route provider fails.
    /// Every later failure degrades into fewer stops or a warning.
    pub async fn plan(
        &self,
        trip: &Trip,
        battery: BatteryState,
        vehicle: &VehicleParams,
    ) -> Result<RoutePlan, PlanError> {
        let route = self
            .routes
            .get_route(trip.origin, trip.destination)
            .await
            .map_err(|source| PlanError::RouteUnavailable { source })?;

        let current_range_km = battery.current_range_km(vehicle);
        let mut plan = RoutePlan::for_route(&route, current_range_km);
        log::debug!(
            "planning {} trip of {:.1} km with {:.1} km of range",
            trip.priority,
            plan.total_distance_km,
            current_range_km
        );
        if !plan.needs_charging {
            return Ok(plan);
        }

        plan.stops = self.scan(&route, current_range_km, vehicle).await;
        if plan.stops.is_empty() {
            plan.warn(NO_STATIONS_WARNING);
        }
        Ok(plan)
    }

    /// Walk the segments and collect stops at every threshold crossing.
    #[expect(
        clippy::float_arithmetic,
        reason = "distance accumulation is floating-point"
    )]
    async fn scan(
        &self,
        route: &RouteGeometry,
        current_range_km: f64,
        vehicle: &VehicleParams,
    ) -> Vec<ChargingStop> {
        let threshold_km = vehicle.search_threshold_km(current_range_km);
        let limit = vehicle.max_candidates_per_stop();
        let evaluator = DetourEvaluator::new(&self.routes);
        let mut stops = Vec::new();
        let mut accumulated_km = 0.0;

        for segment in &route.segments {
            accumulated_km += segment.distance_km;
            if accumulated_km < threshold_km {
                continue;
            }
            log::debug!(
                "search threshold of {threshold_km:.1} km reached after {accumulated_km:.1} km"
            );
            let candidates = self.candidates_near(segment.end, limit).await;
            if candidates.is_empty() {
                continue;
            }
            stops.extend(evaluator.evaluate(segment.end, candidates, limit).await);
            accumulated_km = 0.0;
        }
        stops
    }

    /// Query the directory, keeping its ordering and at most `limit` entries.
    async fn candidates_near(&self, waypoint: Coord<f64>, limit: usize) -> Vec<ChargingStation> {
        match self.stations.find_near(waypoint, self.search_radius_km).await {
            Ok(mut stations) => {
                stations.truncate(limit);
                stations
            }
            Err(err) => {
                log::warn!(
                    "station lookup near ({:.5}, {:.5}) failed: {err}",
                    waypoint.y,
                    waypoint.x
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};

    use crate::StationError;
    use crate::test_support::{StubRouteProvider, StubStationDirectory, sample_stations, uniform_route};

    fn trip() -> Trip {
        Trip::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 0.0 })
    }

    fn half_charge() -> BatteryState {
        BatteryState::new(50.0).expect("valid battery")
    }

    #[fixture]
    fn long_route() -> RouteGeometry {
        uniform_route(500.0, 50.0)
    }

    fn routes_for(route: RouteGeometry) -> StubRouteProvider {
        let trip = trip();
        StubRouteProvider::new().with_route(trip.origin, trip.destination, Ok(route))
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
            .block_on(future)
    }

    #[rstest]
    fn route_failure_is_fatal() {
        let trip = trip();
        let routes = StubRouteProvider::new().with_route(
            trip.origin,
            trip.destination,
            Err(RouteError::NotFound {
                message: "no path".to_owned(),
            }),
        );
        let planner = RoutePlanner::new(routes, StubStationDirectory::empty());

        let err = block_on(planner.plan(&trip, half_charge(), &VehicleParams::default()))
            .expect_err("planning should fail");

        assert!(matches!(err, PlanError::RouteUnavailable { .. }));
    }

    #[rstest]
    fn short_trip_skips_station_lookup() {
        let directory = StubStationDirectory::always(sample_stations(3, Coord { x: 1.0, y: 0.0 }));
        let planner = RoutePlanner::new(routes_for(uniform_route(100.0, 50.0)), directory);

        let plan = block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("plan should succeed");

        assert!(!plan.needs_charging);
        assert!(plan.stops.is_empty());
        assert!(plan.warnings.is_empty());
        assert_eq!(planner.stations.queries().len(), 0);
    }

    #[rstest]
    fn exact_range_does_not_need_charging() {
        let planner = RoutePlanner::new(
            routes_for(uniform_route(150.0, 50.0)),
            StubStationDirectory::empty(),
        );

        let plan = block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("plan should succeed");

        assert!(!plan.needs_charging);
        assert_eq!(plan.current_range_km, 150.0);
    }

    #[rstest]
    fn first_search_happens_after_third_segment(long_route: RouteGeometry) {
        let third_end = long_route.segments.get(2).expect("ten segments").end;
        let planner = RoutePlanner::new(routes_for(long_route), StubStationDirectory::empty());

        let plan = block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("plan should succeed");

        assert!(plan.needs_charging);
        let queries = planner.stations.queries();
        assert_eq!(queries.first().copied(), Some(third_end));
    }

    #[rstest]
    fn empty_lookups_keep_accumulating(long_route: RouteGeometry) {
        let planner = RoutePlanner::new(routes_for(long_route), StubStationDirectory::empty());

        let plan = block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("plan should succeed");

        // Segments 3 through 10 all sit beyond the threshold.
        assert_eq!(planner.stations.queries().len(), 8);
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings.contains(NO_STATIONS_WARNING));
    }

    #[rstest]
    fn successful_lookup_resets_the_counter(long_route: RouteGeometry) {
        let directory = StubStationDirectory::always(sample_stations(1, Coord { x: 3.0, y: 0.0 }));
        let planner = RoutePlanner::new(routes_for(long_route), directory);

        let plan = block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("plan should succeed");

        // Thresholds trip after segments 3, 6 and 9.
        assert_eq!(planner.stations.queries().len(), 3);
        assert_eq!(plan.stops.len(), 3);
        assert!(plan.warnings.is_empty());
    }

    #[rstest]
    fn directory_failures_degrade_to_warning(long_route: RouteGeometry) {
        let directory = StubStationDirectory::failing(StationError::ParseError {
            message: "unexpected payload".to_owned(),
        });
        let planner = RoutePlanner::new(routes_for(long_route), directory);

        let plan = block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("station failures are not fatal");

        assert!(plan.stops.is_empty());
        assert_eq!(
            plan.warnings.iter().collect::<Vec<_>>(),
            vec![NO_STATIONS_WARNING]
        );
    }

    #[rstest]
    fn candidates_are_capped_in_directory_order(long_route: RouteGeometry) {
        let stations = sample_stations(5, Coord { x: 3.0, y: 0.0 });
        let directory = StubStationDirectory::scripted(vec![Ok(stations.clone())]);
        let planner = RoutePlanner::new(routes_for(long_route), directory);

        let plan = block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("plan should succeed");

        let ids: Vec<u64> = plan.stops.iter().map(|stop| stop.station.id).collect();
        let expected: Vec<u64> = stations.iter().take(3).map(|station| station.id).collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    fn failed_detour_drops_only_that_candidate(long_route: RouteGeometry) {
        let trip = trip();
        let stations = sample_stations(3, Coord { x: 3.0, y: 0.0 });
        let unreachable = stations.get(1).expect("three stations").location;
        let routes = StubRouteProvider::new()
            .with_route(trip.origin, trip.destination, Ok(long_route))
            .failing_destination(unreachable);
        let directory = StubStationDirectory::scripted(vec![Ok(stations.clone())]);
        let planner = RoutePlanner::new(routes, directory);

        let plan = block_on(planner.plan(&trip, half_charge(), &VehicleParams::default()))
            .expect("a failed detour is not fatal");

        let ids: Vec<u64> = plan.stops.iter().map(|stop| stop.station.id).collect();
        let expected: Vec<u64> = [0_usize, 2]
            .iter()
            .filter_map(|&index| stations.get(index))
            .map(|station| station.id)
            .collect();
        assert_eq!(ids, expected);
        assert!(plan.warnings.is_empty());
    }

    #[rstest]
    fn search_radius_is_forwarded(long_route: RouteGeometry) {
        let planner = RoutePlanner::new(routes_for(long_route), StubStationDirectory::empty())
            .with_search_radius_km(25.0);

        block_on(planner.plan(&trip(), half_charge(), &VehicleParams::default()))
            .expect("plan should succeed");

        assert!(planner.stations.radii().iter().all(|&radius| radius == 25.0));
    }
}
