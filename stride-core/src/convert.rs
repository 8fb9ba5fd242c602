//! Step count unit conversion
//!
//! Linear estimates only: a fixed stride length and a fixed energy cost
//! per step.

/// Assumed stride length in metres
pub const METERS_PER_STEP: f64 = 0.775;

/// Assumed energy cost of one step in kcal
pub const KCAL_PER_STEP: f64 = 0.04;

/// Distance covered by `steps` in kilometres
pub fn distance_km(steps: u32) -> f64 {
    steps as f64 * METERS_PER_STEP / 1000.0
}

/// Energy spent over `steps` in kcal
pub fn calories_kcal(steps: u32) -> f64 {
    steps as f64 * KCAL_PER_STEP
}

/// Distance and calorie estimates for a step count
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DerivedMetrics {
    /// Distance in kilometres
    pub distance_km: f64,
    /// Energy in kcal
    pub calories_kcal: f64,
}

impl DerivedMetrics {
    /// Compute the metrics for a step count
    pub fn from_steps(steps: u32) -> Self {
        Self {
            distance_km: distance_km(steps),
            calories_kcal: calories_kcal(steps),
        }
    }
}
