//! Configuration loading
//!
//! Loads the tracker configuration from flash or embedded defaults.

pub mod loader;

pub use loader::{load_config, ConfigPersistence};
