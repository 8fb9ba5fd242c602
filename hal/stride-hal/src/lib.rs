//! Stride Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the pedometer core
//! is written against. Chip-specific crates (currently RP2040) implement
//! them, and host tests substitute in-memory doubles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (stride-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stride-core (tracker, summary store)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stride-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  stride-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`flash::FlashStorage`] - Persistent key-value storage
//! - [`sensor::StepSensor`] - Step counter sensor source

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod sensor;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use sensor::{SensorEvent, StepSensor};
