//! Board-agnostic core logic for the Stride pedometer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Unit conversion from steps to distance and calories
//! - Two-state tracking state machine and the tracker that drives it
//! - Summary store persisting the last totals to key-value flash
//! - Display contract and text formatting
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod convert;
pub mod readout;
pub mod state;
pub mod summary;
pub mod tracker;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use convert::DerivedMetrics;
pub use readout::{Readout, StatusLine};
pub use state::{Event, TrackingState};
pub use summary::{PersistedSummary, StoreError, SummaryStore};
pub use tracker::Tracker;
