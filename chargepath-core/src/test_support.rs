//! In-memory collaborators used by unit, behaviour and downstream tests.
//!
//! The doubles record how they were called so tests can assert on the
//! planner's interaction with them as well as on its output.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;

use crate::{
    AuthError, AuthProvider, ChargingStation, RouteError, RouteGeometry, RouteProvider, Segment,
    StationDirectory, StationError,
};

type Scripted<T, E> = Mutex<VecDeque<Result<T, E>>>;

/// `RouteProvider` answering from a fixed table.
///
/// Requests that match no entry receive a one-kilometre, one-minute leg
/// ending at the requested destination.
#[derive(Debug, Default)]
pub struct StubRouteProvider {
    routes: Vec<(Coord<f64>, Coord<f64>, Result<RouteGeometry, RouteError>)>,
    failing_destinations: Vec<Coord<f64>>,
    stalled_origins: Vec<Coord<f64>>,
    calls: AtomicUsize,
}

impl StubRouteProvider {
    /// Create a provider with no stubbed routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests from `origin` to `destination` with `result`.
    #[must_use]
    pub fn with_route(
        mut self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        result: Result<RouteGeometry, RouteError>,
    ) -> Self {
        self.routes.push((origin, destination, result));
        self
    }

    /// Fail every request whose destination is `destination`.
    #[must_use]
    pub fn failing_destination(mut self, destination: Coord<f64>) -> Self {
        self.failing_destinations.push(destination);
        self
    }

    /// Never complete requests starting at `origin`.
    #[must_use]
    pub fn stalled_origin(mut self, origin: Coord<f64>) -> Self {
        self.stalled_origins.push(origin);
        self
    }

    /// Number of `get_route` calls received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, origin: Coord<f64>, destination: Coord<f64>) -> Result<RouteGeometry, RouteError> {
        if self.failing_destinations.contains(&destination) {
            return Err(RouteError::NotFound {
                message: format!("no route to ({}, {})", destination.x, destination.y),
            });
        }
        self.routes
            .iter()
            .find(|(from, to, _)| *from == origin && *to == destination)
            .map_or_else(
                || Ok(unit_leg(destination)),
                |(_, _, result)| result.clone(),
            )
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    async fn get_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteGeometry, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stalled_origins.contains(&origin) {
            std::future::pending::<()>().await;
        }
        self.lookup(origin, destination)
    }
}

fn unit_leg(destination: Coord<f64>) -> RouteGeometry {
    RouteGeometry::from_segments(vec![Segment {
        distance_km: 1.0,
        duration: Duration::from_secs(60),
        end: destination,
    }])
}

/// `StationDirectory` returning scripted answers and recording queries.
#[derive(Debug, Default)]
pub struct StubStationDirectory {
    fallback: Option<Result<Vec<ChargingStation>, StationError>>,
    script: Scripted<Vec<ChargingStation>, StationError>,
    queries: Mutex<Vec<(Coord<f64>, f64)>>,
}

impl StubStationDirectory {
    /// Return `stations` for every query.
    #[must_use]
    pub fn always(stations: Vec<ChargingStation>) -> Self {
        Self {
            fallback: Some(Ok(stations)),
            ..Self::default()
        }
    }

    /// Return no stations for every query.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fail every query with `error`.
    #[must_use]
    pub fn failing(error: StationError) -> Self {
        Self {
            fallback: Some(Err(error)),
            ..Self::default()
        }
    }

    /// Answer queries from `answers` in order, then return no stations.
    #[must_use]
    pub fn scripted(answers: Vec<Result<Vec<ChargingStation>, StationError>>) -> Self {
        Self {
            script: Mutex::new(answers.into()),
            ..Self::default()
        }
    }

    /// Locations queried so far, in call order.
    #[must_use]
    pub fn queries(&self) -> Vec<Coord<f64>> {
        self.recorded().iter().map(|&(location, _)| location).collect()
    }

    /// Radii queried so far, in call order.
    #[must_use]
    pub fn radii(&self) -> Vec<f64> {
        self.recorded().iter().map(|&(_, radius)| radius).collect()
    }

    fn recorded(&self) -> Vec<(Coord<f64>, f64)> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl StationDirectory for StubStationDirectory {
    async fn find_near(
        &self,
        location: Coord<f64>,
        radius_km: f64,
    ) -> Result<Vec<ChargingStation>, StationError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((location, radius_km));
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        scripted
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// `AuthProvider` handing out a fixed token.
#[derive(Debug, Clone)]
pub struct StaticAuthProvider {
    token: String,
}

impl StaticAuthProvider {
    /// Create a provider returning `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}

/// Straight eastbound route split into segments of `segment_km`.
///
/// The final segment is shorter when `total_km` is not a multiple of
/// `segment_km`. Each kilometre takes one minute and one hundredth of a
/// degree of longitude.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "synthetic geometry is computed in floating point"
)]
pub fn uniform_route(total_km: f64, segment_km: f64) -> RouteGeometry {
    let step = if segment_km > 0.0 { segment_km } else { total_km };
    let mut segments = Vec::new();
    let mut travelled = 0.0;
    while total_km - travelled > 0.0 {
        let distance_km = step.min(total_km - travelled);
        travelled += distance_km;
        segments.push(Segment {
            distance_km,
            duration: Duration::from_secs_f64(distance_km * 60.0),
            end: Coord {
                x: travelled / 100.0,
                y: 0.0,
            },
        });
    }
    RouteGeometry::from_segments(segments)
}

/// `count` named stations placed just east of `near`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "station offsets are computed in floating point"
)]
pub fn sample_stations(count: u32, near: Coord<f64>) -> Vec<ChargingStation> {
    (1..=count)
        .map(|index| {
            let offset = f64::from(index) * 0.01;
            ChargingStation::new(
                u64::from(index) + 100,
                format!("{index} Highway Road"),
                Coord {
                    x: near.x + offset,
                    y: near.y,
                },
            )
            .with_name(format!("Station {index}"))
            .with_pincode(format!("11000{index}"))
        })
        .collect()
}
