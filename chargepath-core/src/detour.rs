//! Detour cost from a point on the route to a candidate station.
//!
//! A detour is the one-way travel cost reported by the [`RouteProvider`] for
//! the leg from the waypoint to the station; it is not doubled into a round
//! trip.

use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use geo::Coord;
use thiserror::Error;

use crate::{ChargingStation, ChargingStop, RouteError, RouteProvider};

/// One-way travel cost from the route to a station.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detour {
    /// Distance in kilometres.
    pub distance_km: f64,
    /// Expected travel time.
    pub duration: Duration,
}

/// Errors from [`DetourEvaluator::detour`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetourError {
    /// No route to the station could be obtained.
    #[error("failed to compute detour to station {station_id}: {source}")]
    RouteFailed {
        /// Station the detour was computed for.
        station_id: u64,
        /// Underlying routing failure.
        #[source]
        source: RouteError,
    },
}

/// Computes detours through a [`RouteProvider`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use chargepath_core::{ChargingStation, DetourEvaluator};
/// use chargepath_core::test_support::StubRouteProvider;
///
/// let routes = StubRouteProvider::new();
/// let evaluator = DetourEvaluator::new(&routes);
/// let station = ChargingStation::new(1, "Jaipur", Coord { x: 75.8, y: 26.9 });
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let detour = runtime.block_on(evaluator.detour(Coord { x: 75.7, y: 26.9 }, &station))?;
/// assert!(detour.distance_km > 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DetourEvaluator<'a, R: ?Sized> {
    routes: &'a R,
}

impl<'a, R: RouteProvider + ?Sized> DetourEvaluator<'a, R> {
    /// Create an evaluator backed by `routes`.
    #[must_use]
    pub const fn new(routes: &'a R) -> Self {
        Self { routes }
    }

    /// Compute the one-way detour from `waypoint` to `station`.
    ///
    /// # Errors
    ///
    /// Returns [`DetourError::RouteFailed`] when the provider cannot route
    /// to the station.
    pub async fn detour(
        &self,
        waypoint: Coord<f64>,
        station: &ChargingStation,
    ) -> Result<Detour, DetourError> {
        let leg = self
            .routes
            .get_route(waypoint, station.location)
            .await
            .map_err(|source| DetourError::RouteFailed {
                station_id: station.id,
                source,
            })?;
        Ok(Detour {
            distance_km: leg.total_distance_km,
            duration: leg.total_duration,
        })
    }

    /// Evaluate detours for `candidates` with at most `concurrency` requests
    /// in flight.
    ///
    /// Results keep the candidates' order. A candidate whose detour fails is
    /// dropped; the others are still returned.
    pub async fn evaluate(
        &self,
        waypoint: Coord<f64>,
        candidates: Vec<ChargingStation>,
        concurrency: usize,
    ) -> Vec<ChargingStop> {
        stream::iter(candidates)
            .map(move |station| async move {
                match self.detour(waypoint, &station).await {
                    Ok(detour) => Some(ChargingStop { station, detour }),
                    Err(err) => {
                        log::warn!("dropping charging candidate: {err}");
                        None
                    }
                }
            })
            .buffered(concurrency.max(1))
            .filter_map(std::future::ready)
            .collect()
            .await
    }
}
