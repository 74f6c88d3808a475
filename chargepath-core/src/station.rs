//! Charging stations and the stops selected from them.

use std::borrow::Cow;

use geo::Coord;

use crate::Detour;

/// A charging station listed by a [`StationDirectory`](crate::StationDirectory).
///
/// # Examples
/// ```
/// use geo::Coord;
/// use chargepath_core::ChargingStation;
///
/// let station = ChargingStation::new(7, "MG Road, Bengaluru", Coord { x: 77.6, y: 12.97 });
/// assert_eq!(station.display_name(), "Charging Station 7");
///
/// let named = station.with_name("Indiranagar Hub");
/// assert_eq!(named.display_name(), "Indiranagar Hub");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargingStation {
    /// Identifier assigned by the directory.
    pub id: u64,
    /// Station name, when the directory knows one.
    pub name: Option<String>,
    /// Postal address.
    pub address: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Postal code, when provided.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pincode: Option<String>,
}

impl ChargingStation {
    /// Construct an unnamed station without a postal code.
    #[must_use]
    pub fn new(id: u64, address: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id,
            name: None,
            address: address.into(),
            location,
            pincode: None,
        }
    }

    /// Set the station name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the postal code.
    #[must_use]
    pub fn with_pincode(mut self, pincode: impl Into<String>) -> Self {
        self.pincode = Some(pincode.into());
        self
    }

    /// Name to show for the station, falling back to its identifier.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Cow::Borrowed(name),
            _ => Cow::Owned(format!("Charging Station {}", self.id)),
        }
    }
}

/// A station proposed as a charging stop, with the cost of reaching it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargingStop {
    /// The proposed station.
    pub station: ChargingStation,
    /// One-way detour from the route to the station.
    pub detour: Detour,
}
