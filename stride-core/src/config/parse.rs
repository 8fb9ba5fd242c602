//! TOML configuration parsing
//!
//! Every section and key is optional; missing values take their defaults.
//!
//! ```toml
//! [tracker]
//! start_action = "sensor"
//!
//! [sensor]
//! fitted = true
//! debounce_ms = 20
//!
//! [display]
//! show_status = true
//! ```

use super::types::{ConfigError, TrackerConfig};

/// Parse and validate a TOML configuration
pub fn parse_config(input: &str) -> Result<TrackerConfig, ConfigError> {
    let config: TrackerConfig = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
}
