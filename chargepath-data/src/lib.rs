//! HTTP adapters for the Chargepath engine.
//!
//! Responsibilities:
//! - Fetch driving routes from an OSRM service.
//! - Look up charging stations through the EV station API.
//! - Obtain station API tokens through a credential login.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `chargepath-core`).
//! - Stay runtime-agnostic; adapters are async and never block.
//!
//! Invariants:
//! - Thread-safe by default; clients are cheap to clone and share.
//! - No global mutable state.

pub mod auth;
mod http;
pub mod routing;
pub mod stations;

pub use auth::{LoginAuthConfig, LoginAuthProvider};
pub use http::{DEFAULT_USER_AGENT, ProviderBuildError};
pub use routing::{OsrmRouteProvider, OsrmRouteProviderConfig};
pub use stations::{HttpStationDirectory, HttpStationDirectoryConfig, StationRegion};
