//! HTTP route provider for the OSRM routing service.
//!
//! This module provides [`OsrmRouteProvider`], an implementation of
//! [`chargepath_core::RouteProvider`] that fetches driving routes from the
//! OSRM Route API.
//!
//! # Architecture
//!
//! The provider is natively asynchronous: each `get_route` call issues one
//! `GET` request and suspends until the response arrives. It owns no runtime,
//! so callers drive it from whichever executor runs the planner.
//!
//! # Example
//!
//! ```no_run
//! use chargepath_data::routing::{OsrmRouteProvider, OsrmRouteProviderConfig};
//! use std::time::Duration;
//!
//! let config = OsrmRouteProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let provider = OsrmRouteProvider::with_config(config)?;
//! # Ok::<(), chargepath_data::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_PROFILE, OsrmRouteProvider, OsrmRouteProviderConfig};
