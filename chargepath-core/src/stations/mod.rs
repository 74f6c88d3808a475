//! Look up charging stations near a coordinate.
//!
//! [`StationDirectory`] is the seam to whatever station catalogue backs the
//! planner. HTTP-backed directories usually need credentials; those are
//! supplied through an injected [`AuthProvider`] rather than fetched by the
//! planner itself.

mod directory;
mod error;

pub use directory::{AuthProvider, StationDirectory};
pub use error::{AuthError, StationError};
