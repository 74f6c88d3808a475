//! Core domain types and charging-stop planning for the Chargepath engine.
//!
//! The crate answers one question: can a trip be completed on the current
//! battery, and if not, where along the route should the vehicle stop to
//! charge? Route geometry and station data come from collaborators behind the
//! [`RouteProvider`] and [`StationDirectory`] traits, so the planning logic
//! stays free of I/O concerns.
//!
//! Responsibilities:
//! - Model trips, vehicle range characteristics and planning results.
//! - Scan route geometry for charging thresholds and rank candidates by the
//!   directory's own ordering.
//! - Degrade gracefully: only a missing route aborts planning.
//!
//! Invariants:
//! - No global mutable state; planning constants are passed explicitly.
//! - A plan is either fully computed or the call fails as a whole.

#![forbid(unsafe_code)]

pub mod detour;
pub mod plan;
pub mod planner;
pub mod route;
pub mod routing;
pub mod session;
pub mod station;
pub mod stations;
#[doc(hidden)]
pub mod test_support;
pub mod trip;
pub mod vehicle;

pub use detour::{Detour, DetourError, DetourEvaluator};
pub use plan::{NO_STATIONS_WARNING, PlanRequest, PlanRequestValidationError, RoutePlan};
pub use planner::{DEFAULT_SEARCH_RADIUS_KM, PlanError, RoutePlanner};
pub use route::{RouteGeometry, Segment};
pub use routing::{RouteError, RouteProvider};
pub use session::{PlanOutcome, PlanSession, RequestId};
pub use station::{ChargingStation, ChargingStop};
pub use stations::{AuthError, AuthProvider, StationDirectory, StationError};
pub use trip::{OptimizationPriority, Trip};
pub use vehicle::{BatteryState, BatteryStateError, VehicleParams, VehicleParamsError};
