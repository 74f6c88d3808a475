//! OSRM API response types for the Route service.
//!
//! Only the fields needed to build a [`RouteGeometry`](chargepath_core::RouteGeometry)
//! are decoded. Requests ask for `steps=true&geometries=geojson`, so each step
//! carries a GeoJSON `LineString` whose last point is where the step ends.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Alternative routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if the service found no route between the coordinates.
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        self.code == "NoRoute"
    }
}

/// One route between the requested coordinates.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Route length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// Legs between consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

/// Route between two consecutive waypoints.
#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    /// Leg length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// Turn-by-turn steps in travel order.
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

/// One manoeuvre and the road travelled after it.
#[derive(Debug, Deserialize)]
pub struct OsrmStep {
    /// Step length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// GeoJSON geometry of the step, when requested.
    pub geometry: Option<StepGeometry>,
    /// Manoeuvre starting the step.
    pub maneuver: Maneuver,
}

/// GeoJSON `LineString` of `[lon, lat]` positions.
#[derive(Debug, Deserialize)]
pub struct StepGeometry {
    /// Positions in travel order.
    pub coordinates: Vec<[f64; 2]>,
}

/// Manoeuvre location as `[lon, lat]`.
#[derive(Debug, Deserialize)]
pub struct Maneuver {
    /// Where the manoeuvre takes place.
    pub location: [f64; 2],
}

impl OsrmStep {
    /// Position where the step ends.
    ///
    /// Falls back to the manoeuvre location when the step has no geometry.
    #[must_use]
    pub fn end(&self) -> [f64; 2] {
        self.geometry
            .as_ref()
            .and_then(|geometry| geometry.coordinates.last().copied())
            .unwrap_or(self.maneuver.location)
    }
}
