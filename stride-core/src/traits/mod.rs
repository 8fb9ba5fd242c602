//! Collaborator traits
//!
//! The display surface is defined here; storage and sensor traits live in
//! `stride-hal` and are re-exported for convenience.

pub mod display;

pub use display::MetricsDisplay;
pub use stride_hal::{FlashError, FlashStorage, SensorEvent, StepSensor, StorageKey};
