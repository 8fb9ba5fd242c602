//! Summary record type

use serde::{Deserialize, Serialize};

/// Last saved session totals
///
/// Floats are narrowed to `f32` on save.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedSummary {
    /// Step count
    pub steps: u32,
    /// Distance in kilometres
    pub distance_km: f32,
    /// Energy in kcal
    pub calories_kcal: f32,
}

impl PersistedSummary {
    /// Build a record from raw values
    pub fn new(steps: u32, distance_km: f64, calories_kcal: f64) -> Self {
        Self {
            steps,
            distance_km: distance_km as f32,
            calories_kcal: calories_kcal as f32,
        }
    }

    /// Check if this is the never-written default
    pub fn is_empty(&self) -> bool {
        self.steps == 0 && self.distance_km == 0.0 && self.calories_kcal == 0.0
    }
}
