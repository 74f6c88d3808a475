//! HTTP station directory for the EV charging-station lookup API.
//!
//! This module provides [`HttpStationDirectory`], an implementation of
//! [`chargepath_core::StationDirectory`] that posts coordinate queries to the
//! lookup service and filters the answer to the requested radius.
//!
//! # Example
//!
//! ```no_run
//! use chargepath_core::StationDirectory;
//! use chargepath_data::auth::LoginAuthProvider;
//! use chargepath_data::stations::HttpStationDirectory;
//! use geo::Coord;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = LoginAuthProvider::new("https://api.example.com/user/login", "user", "secret")?;
//! let directory = HttpStationDirectory::new("https://api.example.com/EVYATRA/01", auth)?;
//! let stations = directory.find_near(Coord { x: 77.209, y: 28.614 }, 50.0).await?;
//! for station in &stations {
//!     println!("{}: {}", station.display_name(), station.address);
//! }
//! # Ok(())
//! # }
//! ```

mod directory;
mod wire;

pub use directory::{HttpStationDirectory, HttpStationDirectoryConfig};

/// Administrative region understood by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationRegion {
    /// Service-specific state identifier.
    pub state_id: String,
    /// Service-specific city identifier.
    pub city_id: String,
}

impl StationRegion {
    /// Create a region from its state and city identifiers.
    #[must_use]
    pub fn new(state_id: impl Into<String>, city_id: impl Into<String>) -> Self {
        Self {
            state_id: state_id.into(),
            city_id: city_id.into(),
        }
    }
}
