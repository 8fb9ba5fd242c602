//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::state::Event;

/// Upper bound for the step pulse debounce window
pub const MAX_DEBOUNCE_MS: u16 = 1000;

/// Default step pulse debounce window
pub const DEFAULT_DEBOUNCE_MS: u16 = 20;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Text is not valid TOML or does not match the schema
    Parse,
    /// A value is outside its allowed range
    InvalidValue,
}

/// What the start button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum StartAction {
    /// Start a sensor-driven session
    #[default]
    Sensor,
    /// Load the synthetic mock run (bench testing without a sensor)
    Mock,
}

/// `[tracker]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct TrackerSection {
    /// Behaviour of the start button
    pub start_action: StartAction,
}

/// `[sensor]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct SensorConfig {
    /// Whether a step detector is fitted on the board
    pub fitted: bool,
    /// Minimum spacing between two step pulses in milliseconds
    pub debounce_ms: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            fitted: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// `[display]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct DisplayConfig {
    /// Show "Tracking started/stopped" status lines
    pub show_status: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_status: true }
    }
}

/// Complete tracker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct TrackerConfig {
    pub tracker: TrackerSection,
    pub sensor: SensorConfig,
    pub display: DisplayConfig,
}

impl TrackerConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::InvalidValue);
        }
        Ok(())
    }

    /// Event the start button produces
    pub fn start_event(&self) -> Event {
        match self.tracker.start_action {
            StartAction::Sensor => Event::Start,
            StartAction::Mock => Event::MockRun,
        }
    }
}
