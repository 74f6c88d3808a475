//! Fetch route geometry between two coordinates.
//!
//! The [`RouteProvider`] trait abstracts the directions service used both for
//! the trip itself and for detours to candidate charging stations. Callers
//! supply an origin and a destination and receive a [`RouteGeometry`](crate::RouteGeometry)
//! with ordered segments.

mod error;
mod provider;

pub use error::RouteError;
pub use provider::RouteProvider;
