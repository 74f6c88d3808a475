//! Vehicle range characteristics and battery state.
//!
//! Range is modelled as linear in battery charge:
//! `current_range_km = percent / 100 * full_range_km`.
//!
//! Constructors validate their inputs and return `Result` so that the planner
//! never has to guard against nonsensical parameters.

use thiserror::Error;

/// Range of a fully charged vehicle in kilometres.
pub const DEFAULT_FULL_RANGE_KM: f64 = 300.0;
/// Minimum battery percentage the driver wants to keep in reserve.
pub const DEFAULT_SAFETY_THRESHOLD_PERCENT: f64 = 20.0;
/// Fraction of the current range travelled before a stop is sought.
pub const DEFAULT_SEARCH_FRACTION: f64 = 0.7;
/// Number of candidate stations evaluated per search point.
pub const DEFAULT_MAX_CANDIDATES_PER_STOP: usize = 3;

/// Errors returned by [`VehicleParams::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VehicleParamsError {
    /// Full range must be a positive, finite number of kilometres.
    #[error("full range must be positive and finite, got {0}")]
    InvalidFullRange(f64),
    /// Safety threshold must be a percentage.
    #[error("safety threshold must be between 0 and 100 percent, got {0}")]
    InvalidSafetyThreshold(f64),
    /// Search fraction must lie in `(0, 1]`.
    #[error("search fraction must be greater than 0 and at most 1, got {0}")]
    InvalidSearchFraction(f64),
    /// At least one candidate must be evaluated per stop.
    #[error("at least one candidate per stop is required")]
    ZeroCandidates,
}

/// Range characteristics of the vehicle being planned for.
///
/// `safety_threshold_percent` is carried for callers that display it; the
/// planner does not use it to gate charging decisions.
///
/// # Examples
/// ```
/// use chargepath_core::VehicleParams;
///
/// let params = VehicleParams::default();
/// assert_eq!(params.full_range_km(), 300.0);
/// assert_eq!(params.max_candidates_per_stop(), 3);
///
/// let custom = VehicleParams::new(250.0, 15.0, 0.5, 2)?;
/// assert_eq!(custom.search_fraction(), 0.5);
/// # Ok::<(), chargepath_core::VehicleParamsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "VehicleParamsRecord", into = "VehicleParamsRecord")
)]
pub struct VehicleParams {
    full_range_km: f64,
    safety_threshold_percent: f64,
    search_fraction: f64,
    max_candidates_per_stop: usize,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            full_range_km: DEFAULT_FULL_RANGE_KM,
            safety_threshold_percent: DEFAULT_SAFETY_THRESHOLD_PERCENT,
            search_fraction: DEFAULT_SEARCH_FRACTION,
            max_candidates_per_stop: DEFAULT_MAX_CANDIDATES_PER_STOP,
        }
    }
}

impl VehicleParams {
    /// Validate and construct [`VehicleParams`].
    ///
    /// # Errors
    ///
    /// Returns [`VehicleParamsError`] when any parameter is out of range.
    pub fn new(
        full_range_km: f64,
        safety_threshold_percent: f64,
        search_fraction: f64,
        max_candidates_per_stop: usize,
    ) -> Result<Self, VehicleParamsError> {
        if !(full_range_km.is_finite() && full_range_km > 0.0) {
            return Err(VehicleParamsError::InvalidFullRange(full_range_km));
        }
        if !(0.0..=100.0).contains(&safety_threshold_percent) {
            return Err(VehicleParamsError::InvalidSafetyThreshold(
                safety_threshold_percent,
            ));
        }
        if !(search_fraction > 0.0 && search_fraction <= 1.0) {
            return Err(VehicleParamsError::InvalidSearchFraction(search_fraction));
        }
        if max_candidates_per_stop == 0 {
            return Err(VehicleParamsError::ZeroCandidates);
        }
        Ok(Self {
            full_range_km,
            safety_threshold_percent,
            search_fraction,
            max_candidates_per_stop,
        })
    }

    /// Range at 100% charge, in kilometres.
    #[must_use]
    pub const fn full_range_km(&self) -> f64 {
        self.full_range_km
    }

    /// Reserve percentage the driver wants to keep.
    #[must_use]
    pub const fn safety_threshold_percent(&self) -> f64 {
        self.safety_threshold_percent
    }

    /// Fraction of the current range consumed before a stop is sought.
    #[must_use]
    pub const fn search_fraction(&self) -> f64 {
        self.search_fraction
    }

    /// Maximum number of candidate stations evaluated per search point.
    #[must_use]
    pub const fn max_candidates_per_stop(&self) -> usize {
        self.max_candidates_per_stop
    }

    /// Distance after which the planner looks for a charging stop.
    ///
    /// # Examples
    /// ```
    /// use chargepath_core::VehicleParams;
    ///
    /// let params = VehicleParams::default();
    /// assert!((params.search_threshold_km(150.0) - 105.0).abs() < 1e-9);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "threshold is a fraction of a floating-point range"
    )]
    pub fn search_threshold_km(&self, current_range_km: f64) -> f64 {
        self.search_fraction * current_range_km
    }
}

/// Serialised form of [`VehicleParams`]; omitted fields take the defaults.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct VehicleParamsRecord {
    full_range_km: f64,
    safety_threshold_percent: f64,
    search_fraction: f64,
    max_candidates_per_stop: usize,
}

#[cfg(feature = "serde")]
impl Default for VehicleParamsRecord {
    fn default() -> Self {
        VehicleParams::default().into()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<VehicleParamsRecord> for VehicleParams {
    type Error = VehicleParamsError;

    fn try_from(record: VehicleParamsRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.full_range_km,
            record.safety_threshold_percent,
            record.search_fraction,
            record.max_candidates_per_stop,
        )
    }
}

#[cfg(feature = "serde")]
impl From<VehicleParams> for VehicleParamsRecord {
    fn from(params: VehicleParams) -> Self {
        Self {
            full_range_km: params.full_range_km,
            safety_threshold_percent: params.safety_threshold_percent,
            search_fraction: params.search_fraction,
            max_candidates_per_stop: params.max_candidates_per_stop,
        }
    }
}

/// Errors returned by [`BatteryState::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BatteryStateError {
    /// Charge must be a finite percentage.
    #[error("battery charge must be between 0 and 100 percent, got {0}")]
    OutOfRange(f64),
}

/// Current charge of the vehicle's battery.
///
/// # Examples
/// ```
/// use chargepath_core::{BatteryState, VehicleParams};
///
/// let battery = BatteryState::new(50.0)?;
/// assert_eq!(battery.current_range_km(&VehicleParams::default()), 150.0);
/// assert!(BatteryState::new(101.0).is_err());
/// # Ok::<(), chargepath_core::BatteryStateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct BatteryState {
    percent: f64,
}

impl BatteryState {
    /// Validate and construct a [`BatteryState`].
    ///
    /// # Errors
    ///
    /// Returns [`BatteryStateError::OutOfRange`] for values outside
    /// `[0, 100]`, including `NaN`.
    pub fn new(percent: f64) -> Result<Self, BatteryStateError> {
        if (0.0..=100.0).contains(&percent) {
            Ok(Self { percent })
        } else {
            Err(BatteryStateError::OutOfRange(percent))
        }
    }

    /// Charge as a percentage in `[0, 100]`.
    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// Distance the vehicle can cover on the present charge.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "range is linear in battery percentage"
    )]
    pub fn current_range_km(&self, params: &VehicleParams) -> f64 {
        self.percent / 100.0 * params.full_range_km
    }
}

impl TryFrom<f64> for BatteryState {
    type Error = BatteryStateError;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<BatteryState> for f64 {
    fn from(state: BatteryState) -> Self {
        state.percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(100.0)]
    fn battery_accepts_boundary_values(#[case] percent: f64) {
        assert!(BatteryState::new(percent).is_ok());
    }

    #[rstest]
    #[case(-0.1)]
    #[case(100.1)]
    #[case(f64::NAN)]
    fn battery_rejects_out_of_range_values(#[case] percent: f64) {
        assert!(matches!(
            BatteryState::new(percent),
            Err(BatteryStateError::OutOfRange(_))
        ));
    }

    #[rstest]
    #[case(100.0, 300.0)]
    #[case(50.0, 150.0)]
    #[case(0.0, 0.0)]
    fn current_range_is_linear_in_charge(#[case] percent: f64, #[case] expected: f64) {
        let battery = BatteryState::new(percent).expect("valid battery");
        let range = battery.current_range_km(&VehicleParams::default());
        assert!((range - expected).abs() < 1e-9, "expected {expected}, got {range}");
    }

    #[rstest]
    fn defaults_match_documented_constants() {
        let params = VehicleParams::default();
        assert_eq!(params.full_range_km(), DEFAULT_FULL_RANGE_KM);
        assert_eq!(
            params.safety_threshold_percent(),
            DEFAULT_SAFETY_THRESHOLD_PERCENT
        );
        assert_eq!(params.search_fraction(), DEFAULT_SEARCH_FRACTION);
        assert_eq!(
            params.max_candidates_per_stop(),
            DEFAULT_MAX_CANDIDATES_PER_STOP
        );
    }

    #[rstest]
    #[case(0.0, 20.0, 0.7, 3, VehicleParamsError::InvalidFullRange(0.0))]
    #[case(300.0, 120.0, 0.7, 3, VehicleParamsError::InvalidSafetyThreshold(120.0))]
    #[case(300.0, 20.0, 0.0, 3, VehicleParamsError::InvalidSearchFraction(0.0))]
    #[case(300.0, 20.0, 1.5, 3, VehicleParamsError::InvalidSearchFraction(1.5))]
    #[case(300.0, 20.0, 0.7, 0, VehicleParamsError::ZeroCandidates)]
    fn vehicle_params_reject_invalid_values(
        #[case] full_range_km: f64,
        #[case] safety: f64,
        #[case] fraction: f64,
        #[case] candidates: usize,
        #[case] expected: VehicleParamsError,
    ) {
        let err = VehicleParams::new(full_range_km, safety, fraction, candidates)
            .expect_err("invalid params should be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn vehicle_params_reject_infinite_range() {
        let err = VehicleParams::new(f64::INFINITY, 20.0, 0.7, 3)
            .expect_err("infinite range should be rejected");
        assert!(matches!(err, VehicleParamsError::InvalidFullRange(_)));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn battery_deserialisation_validates_range() {
        let ok: BatteryState = serde_json::from_str("42.5").expect("valid battery");
        assert_eq!(ok.percent(), 42.5);
        assert!(serde_json::from_str::<BatteryState>("140").is_err());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn vehicle_params_deserialise_with_defaults_and_validation() {
        let partial: VehicleParams =
            serde_json::from_str(r#"{ "full_range_km": 420.0, "max_candidates_per_stop": 5 }"#)
                .expect("partial params should decode");
        let expected = VehicleParams::new(
            420.0,
            DEFAULT_SAFETY_THRESHOLD_PERCENT,
            DEFAULT_SEARCH_FRACTION,
            5,
        )
        .expect("valid params");
        assert_eq!(partial, expected);

        let encoded = serde_json::to_value(VehicleParams::default()).expect("params encode");
        assert_eq!(
            encoded.get("search_fraction").and_then(serde_json::Value::as_f64),
            Some(DEFAULT_SEARCH_FRACTION)
        );

        let err = serde_json::from_str::<VehicleParams>(r#"{ "search_fraction": 1.5 }"#)
            .expect_err("fraction above one should be rejected");
        assert!(err.to_string().contains("search fraction"), "error: {err}");
    }
}
