//! Display text formatting
//!
//! Defines what the display surface is told; rendering is up to the
//! [`MetricsDisplay`](crate::traits::MetricsDisplay) implementation.

use core::fmt::Write;

use heapless::String;

use crate::convert::DerivedMetrics;
use crate::summary::PersistedSummary;

/// Maximum length of a single readout field
pub const FIELD_LEN: usize = 24;

/// Maximum length of the summary message
pub const SUMMARY_LEN: usize = 128;

/// Title shown above the summary message
pub const SUMMARY_TITLE: &str = "Fitness Summary";

/// Live step count with its derived metrics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readout {
    /// Steps counted so far
    pub steps: u32,
    /// Estimates for `steps`
    pub metrics: DerivedMetrics,
}

impl Readout {
    /// Build a readout for a step count
    pub fn from_steps(steps: u32) -> Self {
        Self {
            steps,
            metrics: DerivedMetrics::from_steps(steps),
        }
    }

    /// Step count text, e.g. `"1000 steps"`
    pub fn steps_text(&self) -> String<FIELD_LEN> {
        let mut text = String::new();
        let _ = write!(text, "{} steps", self.steps);
        text
    }

    /// Distance text with two decimals, e.g. `"0.78 km"`
    pub fn distance_text(&self) -> String<FIELD_LEN> {
        let mut text = String::new();
        let _ = write!(text, "{:.2} km", self.metrics.distance_km);
        text
    }

    /// Calorie text with two decimals, e.g. `"40.00 kcal"`
    pub fn calories_text(&self) -> String<FIELD_LEN> {
        let mut text = String::new();
        let _ = write!(text, "{:.2} kcal", self.metrics.calories_kcal);
        text
    }
}

/// Status lines pushed on session boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusLine {
    /// A session was started
    TrackingStarted,
    /// A session was stopped and saved
    TrackingStopped,
}

impl StatusLine {
    /// Text shown in place of the step count
    pub fn text(&self) -> &'static str {
        match self {
            StatusLine::TrackingStarted => "Tracking started",
            StatusLine::TrackingStopped => "Tracking stopped",
        }
    }
}

/// Format the summary message for a persisted record
///
/// ```text
/// Summary:
/// Steps: 1000
/// Distance: 0.77 km
/// Calories: 40.00 kcal
/// ```
pub fn summary_message(summary: &PersistedSummary) -> String<SUMMARY_LEN> {
    let mut text = String::new();
    let _ = write!(
        text,
        "Summary:\nSteps: {}\nDistance: {:.2} km\nCalories: {:.2} kcal",
        summary.steps, summary.distance_km, summary.calories_kcal
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_texts() {
        let readout = Readout::from_steps(1000);
        assert_eq!(readout.steps_text().as_str(), "1000 steps");
        assert_eq!(readout.distance_text().as_str(), "0.78 km");
        assert_eq!(readout.calories_text().as_str(), "40.00 kcal");
    }

    #[test]
    fn test_zero_readout() {
        let readout = Readout::default();
        assert_eq!(readout.steps_text().as_str(), "0 steps");
        assert_eq!(readout.distance_text().as_str(), "0.00 km");
        assert_eq!(readout.calories_text().as_str(), "0.00 kcal");
    }

    #[test]
    fn test_largest_readout_fits() {
        let readout = Readout::from_steps(u32::MAX);
        assert_eq!(readout.steps_text().as_str(), "4294967295 steps");
        assert!(readout.calories_text().ends_with(" kcal"));
        assert!(readout.distance_text().ends_with(" km"));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(StatusLine::TrackingStarted.text(), "Tracking started");
        assert_eq!(StatusLine::TrackingStopped.text(), "Tracking stopped");
    }

    #[test]
    fn test_summary_message() {
        let summary = PersistedSummary {
            steps: 2000,
            distance_km: 1.5,
            calories_kcal: 80.0,
        };
        assert_eq!(
            summary_message(&summary).as_str(),
            "Summary:\nSteps: 2000\nDistance: 1.50 km\nCalories: 80.00 kcal"
        );
    }

    #[test]
    fn test_empty_summary_message() {
        assert_eq!(
            summary_message(&PersistedSummary::default()).as_str(),
            "Summary:\nSteps: 0\nDistance: 0.00 km\nCalories: 0.00 kcal"
        );
    }
}
