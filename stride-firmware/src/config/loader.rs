//! Configuration persistence
//!
//! Loads the tracker configuration from flash storage.
//! Falls back to embedded defaults if flash is empty.

use core::str;
use defmt::*;

use stride_core::config::{parse_config_lines, ConfigError, TrackerConfig};
use stride_hal_rp2040::flash::{FlashError, FlashStorage, StorageKey};
// Import the FlashStorage trait to bring methods into scope
use stride_hal_rp2040::FlashStorageTrait;

/// Maximum TOML config size
const MAX_TOML_SIZE: usize = 1024;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigLoadError {
    /// Flash operation failed
    Flash(FlashError),
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// TOML parsing or validation failed
    Config(ConfigError),
}

impl From<FlashError> for ConfigLoadError {
    fn from(e: FlashError) -> Self {
        ConfigLoadError::Flash(e)
    }
}

impl From<ConfigError> for ConfigLoadError {
    fn from(e: ConfigError) -> Self {
        ConfigLoadError::Config(e)
    }
}

/// Configuration persistence manager
pub struct ConfigPersistence<'d> {
    storage: FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    /// Create a new config persistence manager
    pub fn new(storage: FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Consume this persistence manager and return the underlying storage
    ///
    /// The summary store takes over the flash once the config is loaded.
    pub fn into_storage(self) -> FlashStorage<'d> {
        self.storage
    }

    /// Load the TOML configuration stored in flash
    pub async fn load(&mut self) -> Result<TrackerConfig, ConfigLoadError> {
        let mut buffer = [0u8; MAX_TOML_SIZE];
        let len = self
            .storage
            .read(StorageKey::TrackerConfigToml, &mut buffer)
            .await?;

        debug!("Read {} bytes of TOML from flash", len);

        let toml_str =
            str::from_utf8(&buffer[..len]).map_err(|_| ConfigLoadError::InvalidUtf8)?;
        Ok(parse_config_lines(toml_str)?)
    }
}

/// Resolve the active configuration
///
/// Order: TOML stored in flash, then the embedded `stride.toml`, then
/// built-in defaults.
pub async fn load_config(persistence: &mut ConfigPersistence<'_>, embedded: &str) -> TrackerConfig {
    match persistence.load().await {
        Ok(config) => {
            info!("Loaded configuration from flash");
            return config;
        }
        Err(ConfigLoadError::Flash(FlashError::NotFound)) => {
            debug!("No configuration in flash, using embedded config");
        }
        Err(e) => {
            warn!("Failed to load flash config: {:?}, using embedded config", e);
        }
    }

    match parse_config_lines(embedded) {
        Ok(config) => config,
        Err(e) => {
            // Only reachable if build.rs validation and the parser disagree
            error!("Failed to parse embedded config: {:?}", e);
            TrackerConfig::default()
        }
    }
}
