//! Trips: an origin/destination pair plus an optimisation hint.
//!
//! # Examples
//! ```
//! use chargepath_core::OptimizationPriority;
//!
//! assert_eq!(OptimizationPriority::default(), OptimizationPriority::Balanced);
//! assert_eq!(OptimizationPriority::Eco.to_string(), "eco");
//! ```

use geo::Coord;

/// Optimisation priority requested for a trip.
///
/// The priority travels with the request so callers can record the user's
/// choice; the planner does not weigh candidates differently per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptimizationPriority {
    /// Balance travel time, energy and cost.
    #[default]
    Balanced,
    /// Prefer energy-efficient routing.
    Eco,
    /// Prefer the fastest arrival.
    Time,
    /// Prefer the cheapest trip.
    Cost,
}

impl OptimizationPriority {
    /// Return the priority as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use chargepath_core::OptimizationPriority;
    ///
    /// assert_eq!(OptimizationPriority::Time.as_str(), "time");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Eco => "eco",
            Self::Time => "time",
            Self::Cost => "cost",
        }
    }
}

impl std::fmt::Display for OptimizationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested journey between two geocoded points.
///
/// Coordinates use `x` for longitude and `y` for latitude.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use chargepath_core::{OptimizationPriority, Trip};
///
/// let trip = Trip::new(Coord { x: 77.21, y: 28.61 }, Coord { x: 72.88, y: 19.08 });
/// assert_eq!(trip.priority, OptimizationPriority::Balanced);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    /// Where the trip starts.
    pub origin: Coord<f64>,
    /// Where the trip ends.
    pub destination: Coord<f64>,
    /// Optimisation hint chosen by the user.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: OptimizationPriority,
}

impl Trip {
    /// Construct a trip with the default [`OptimizationPriority`].
    #[must_use]
    pub fn new(origin: Coord<f64>, destination: Coord<f64>) -> Self {
        Self {
            origin,
            destination,
            priority: OptimizationPriority::default(),
        }
    }

    /// Set the optimisation priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: OptimizationPriority) -> Self {
        self.priority = priority;
        self
    }
}
