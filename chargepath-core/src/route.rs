//! Route geometry returned by a [`RouteProvider`](crate::RouteProvider).
//!
//! Segments are stored in travel order; the planner relies on that ordering
//! when it accumulates distance along the route.

use std::time::Duration;

use geo::Coord;

/// One leg of a route's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Length of the segment in kilometres.
    pub distance_km: f64,
    /// Expected travel time along the segment.
    pub duration: Duration,
    /// Coordinate where the segment ends.
    pub end: Coord<f64>,
}

/// Path between two points with overall totals and ordered segments.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use std::time::Duration;
/// use chargepath_core::{RouteGeometry, Segment};
///
/// let segments = vec![
///     Segment { distance_km: 40.0, duration: Duration::from_secs(1800), end: Coord { x: 1.0, y: 0.0 } },
///     Segment { distance_km: 60.0, duration: Duration::from_secs(2700), end: Coord { x: 2.0, y: 0.0 } },
/// ];
/// let route = RouteGeometry::from_segments(segments);
///
/// assert_eq!(route.total_distance_km, 100.0);
/// assert_eq!(route.total_duration, Duration::from_secs(4500));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteGeometry {
    /// Total route length in kilometres.
    pub total_distance_km: f64,
    /// Total expected travel time.
    pub total_duration: Duration,
    /// Segments in travel order.
    pub segments: Vec<Segment>,
}

impl RouteGeometry {
    /// Construct a geometry from provider-reported totals.
    ///
    /// Totals are kept as reported rather than recomputed from the segments,
    /// since directions services round per-step values independently.
    #[must_use]
    pub const fn new(
        total_distance_km: f64,
        total_duration: Duration,
        segments: Vec<Segment>,
    ) -> Self {
        Self {
            total_distance_km,
            total_duration,
            segments,
        }
    }

    /// Construct a geometry whose totals are the sums of its segments.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let total_distance_km = segments.iter().map(|segment| segment.distance_km).sum();
        let total_duration = segments.iter().map(|segment| segment.duration).sum();
        Self::new(total_distance_km, total_duration, segments)
    }

    /// Coordinate at the end of the route, if it has any segments.
    #[must_use]
    pub fn end(&self) -> Option<Coord<f64>> {
        self.segments.last().map(|segment| segment.end)
    }
}
