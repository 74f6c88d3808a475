//! Facade crate for the Chargepath charging-stop planner.
//!
//! This crate re-exports the core domain types and planner, and exposes the
//! HTTP adapters behind the `http` feature.

#![forbid(unsafe_code)]

pub use chargepath_core::{
    AuthError, AuthProvider, BatteryState, ChargingStation, ChargingStop, DEFAULT_SEARCH_RADIUS_KM,
    Detour, NO_STATIONS_WARNING, OptimizationPriority, PlanError, PlanOutcome, PlanRequest,
    PlanSession, RequestId, RouteError, RouteGeometry, RoutePlan, RoutePlanner, RouteProvider,
    Segment, StationDirectory, StationError, Trip, VehicleParams,
};

#[cfg(feature = "http")]
pub use chargepath_data::{
    HttpStationDirectory, LoginAuthProvider, OsrmRouteProvider, ProviderBuildError,
};
