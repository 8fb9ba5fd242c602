//! RP2040-specific HAL for the pedometer firmware
//!
//! This crate provides RP2040 implementations of the shared `stride-hal`
//! traits:
//!
//! - Flash storage driver (implements `stride_hal::FlashStorage`)
//! - GPIO step pulse sensor (implements `stride_hal::StepSensor`)

#![no_std]

pub mod flash;
pub mod step_input;

// Re-export shared traits from stride-hal for convenience
pub use stride_hal::{FlashStorage as FlashStorageTrait, StepSensor, StorageKey};
