//! Flash storage abstractions
//!
//! Provides traits for persistent key-value storage that can be implemented
//! by chip-specific HALs using their flash memory.

/// Storage keys for persisted data
///
/// The three metric keys form the persisted tracking summary. Each holds a
/// single postcard-encoded scalar and is overwritten in place.
/// [`StorageKey::SummaryCommit`] brackets every summary save so a save that
/// stopped halfway can be told apart from a complete one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Step count of the last summary (`u32`)
    Steps = 0,
    /// Distance of the last summary in kilometres (`f32`)
    Distance = 1,
    /// Calories of the last summary in kcal (`f32`)
    Calories = 2,
    /// Tracker configuration as TOML text
    TrackerConfigToml = 3,
    /// Progress marker of the last summary save
    SummaryCommit = 4,
}

impl StorageKey {
    /// All keys, indexed by their byte value
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Steps,
        StorageKey::Distance,
        StorageKey::Calories,
        StorageKey::TrackerConfigToml,
        StorageKey::SummaryCommit,
    ];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Flash storage trait
///
/// Provides wear-leveled key-value storage. Implementations should handle:
/// - Wear leveling across flash sectors
/// - Data integrity (CRC or similar)
/// - Atomic writes per key, so a reader sees either the old or the new value
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or [`FlashError::NotFound`] if the key
    /// was never written.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Write a value by key, replacing any previous value
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
