//! Route provider trait for origin/destination pairs.

use std::sync::Arc;

use async_trait::async_trait;
use geo::Coord;

use crate::RouteGeometry;

use super::error::RouteError;

/// Fetch route geometry between two coordinates.
///
/// Implementations own any connection pooling or rate limiting and must be
/// safe to share across tasks. The planner awaits each call rather than
/// polling, so implementations should suspend while waiting on I/O.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use geo::Coord;
/// use chargepath_core::{RouteError, RouteGeometry, RouteProvider, Segment};
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RouteProvider for StraightLine {
///     async fn get_route(
///         &self,
///         _origin: Coord<f64>,
///         destination: Coord<f64>,
///     ) -> Result<RouteGeometry, RouteError> {
///         Ok(RouteGeometry::from_segments(vec![Segment {
///             distance_km: 10.0,
///             duration: Duration::from_secs(600),
///             end: destination,
///         }]))
///     }
/// }
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let route = runtime.block_on(
///     StraightLine.get_route(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }),
/// )?;
/// assert_eq!(route.segments.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Return the route from `origin` to `destination`.
    async fn get_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteGeometry, RouteError>;
}

#[async_trait]
impl<T: RouteProvider + ?Sized> RouteProvider for Arc<T> {
    async fn get_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteGeometry, RouteError> {
        (**self).get_route(origin, destination).await
    }
}
