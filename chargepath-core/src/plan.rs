//! Planning requests and the plans produced for them.

use std::collections::BTreeSet;
use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{BatteryState, ChargingStop, RouteGeometry, Trip};

/// Warning attached to a plan that needs charging but found no stations.
pub const NO_STATIONS_WARNING: &str = "no charging stations found along the route";

/// Everything needed to plan one trip.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use chargepath_core::{BatteryState, PlanRequest, Trip};
///
/// let request = PlanRequest {
///     trip: Trip::new(Coord { x: 77.21, y: 28.61 }, Coord { x: 75.79, y: 26.91 }),
///     battery: BatteryState::new(80.0)?,
/// };
/// assert!(request.validate().is_ok());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Origin, destination and optimisation hint.
    pub trip: Trip,
    /// Battery charge at departure.
    pub battery: BatteryState,
}

/// Reasons a [`PlanRequest`] is rejected before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanRequestValidationError {
    /// The origin is not a valid longitude/latitude pair.
    #[error("origin is not a valid longitude/latitude coordinate")]
    InvalidOrigin,
    /// The destination is not a valid longitude/latitude pair.
    #[error("destination is not a valid longitude/latitude coordinate")]
    InvalidDestination,
}

impl PlanRequest {
    /// Check that both endpoints are geocoded coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`PlanRequestValidationError`] naming the first invalid
    /// endpoint.
    pub fn validate(&self) -> Result<(), PlanRequestValidationError> {
        if !is_lon_lat(self.trip.origin) {
            return Err(PlanRequestValidationError::InvalidOrigin);
        }
        if !is_lon_lat(self.trip.destination) {
            return Err(PlanRequestValidationError::InvalidDestination);
        }
        Ok(())
    }
}

fn is_lon_lat(coord: Coord<f64>) -> bool {
    (-180.0..=180.0).contains(&coord.x) && (-90.0..=90.0).contains(&coord.y)
}

/// Outcome of planning a trip.
///
/// A plan that does not need charging never carries stops or warnings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    /// Route length in kilometres.
    pub total_distance_km: f64,
    /// Expected driving time without charging.
    pub total_duration: Duration,
    /// Range available on the departure charge, in kilometres.
    pub current_range_km: f64,
    /// Whether the route is longer than the current range.
    pub needs_charging: bool,
    /// Proposed stops in the order they are reached along the route.
    pub stops: Vec<ChargingStop>,
    /// Deduplicated warnings for the caller to show.
    pub warnings: BTreeSet<String>,
}

impl RoutePlan {
    /// Start a plan for `route` with no stops and no warnings.
    ///
    /// Charging is needed only when the route is strictly longer than the
    /// current range.
    #[must_use]
    pub fn for_route(route: &RouteGeometry, current_range_km: f64) -> Self {
        Self {
            total_distance_km: route.total_distance_km,
            total_duration: route.total_duration,
            current_range_km,
            needs_charging: route.total_distance_km > current_range_km,
            stops: Vec::new(),
            warnings: BTreeSet::new(),
        }
    }

    /// Record a warning; repeated warnings are kept once.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.insert(message.into());
    }
}
