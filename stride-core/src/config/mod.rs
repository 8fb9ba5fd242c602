//! Configuration types
//!
//! Tracker behaviour settings, stored as TOML text and parsed on boot.
//! `parse_config` goes through serde and the `toml` crate and is what the
//! host uses; `parse_config_lines` covers the same files on targets the
//! `toml` crate does not build for.

pub mod lines;
#[cfg(feature = "toml")]
pub mod parse;
pub mod types;

pub use lines::parse_config_lines;
#[cfg(feature = "toml")]
pub use parse::parse_config;
pub use types::*;
