//! Station directory and credential provider traits.

use std::sync::Arc;

use async_trait::async_trait;
use geo::Coord;

use crate::ChargingStation;

use super::error::{AuthError, StationError};

/// Find charging stations near a coordinate.
///
/// Implementations return stations ranked by their own notion of relevance;
/// the planner keeps that order and never re-ranks. An empty list is a valid
/// answer.
#[async_trait]
pub trait StationDirectory: Send + Sync {
    /// Return stations within `radius_km` of `location`.
    async fn find_near(
        &self,
        location: Coord<f64>,
        radius_km: f64,
    ) -> Result<Vec<ChargingStation>, StationError>;
}

#[async_trait]
impl<T: StationDirectory + ?Sized> StationDirectory for Arc<T> {
    async fn find_near(
        &self,
        location: Coord<f64>,
        radius_km: f64,
    ) -> Result<Vec<ChargingStation>, StationError> {
        (**self).find_near(location, radius_km).await
    }
}

/// Supply credentials for a station service.
///
/// The returned string is sent verbatim as the `Authorization` header.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Obtain a token for the next request.
    async fn token(&self) -> Result<String, AuthError>;
}

#[async_trait]
impl<T: AuthProvider + ?Sized> AuthProvider for Arc<T> {
    async fn token(&self) -> Result<String, AuthError> {
        (**self).token().await
    }
}
