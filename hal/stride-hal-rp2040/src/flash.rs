//! Flash storage driver for RP2040
//!
//! Keeps the summary and config keys in a sequential-storage map in the
//! last 64KB of flash. Every summary save writes five items, so the driver
//! holds a key pointer cache for the lifetime of the struct instead of
//! rescanning the partition on each access.
//!
//! Implements the `FlashStorage` trait from `stride-hal`.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::KeyPointerCache;
use sequential_storage::map;

// Re-export shared types from stride-hal
pub use stride_hal::flash::{FlashError, StorageKey};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash (Pico)
pub const DATA_PARTITION_SIZE: usize = 64 * 1024; // 64KB for summary + config
pub const DATA_PARTITION_START: usize = FLASH_SIZE - DATA_PARTITION_SIZE;

/// Flash range for the data partition
pub const DATA_RANGE: core::ops::Range<u32> = (DATA_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Number of erase pages in the data partition
const DATA_PAGES: usize = DATA_PARTITION_SIZE / ERASE_SIZE;

/// Number of distinct keys the cache tracks
const CACHED_KEYS: usize = StorageKey::ALL.len();

/// Scratch buffer size for map operations (largest item is the TOML config)
const ITEM_BUFFER_SIZE: usize = 2048;

type ItemCache = KeyPointerCache<DATA_PAGES, StorageKey, CACHED_KEYS>;

/// RP2040 Flash storage implementation
///
/// Every key maps to one sequential-storage map item; writing a key
/// appends a new item and the old one becomes garbage.
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    cache: ItemCache,
    buffer: [u8; ITEM_BUFFER_SIZE],
}

impl<'d> Rp2040FlashStorage<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            cache: ItemCache::new(),
            buffer: [0u8; ITEM_BUFFER_SIZE],
        }
    }
}

impl<'d> stride_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let item = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            DATA_RANGE,
            &mut self.cache,
            &mut self.buffer,
            &key,
        )
        .await
        .map_err(map_error)?;

        let data = item.ok_or(FlashError::NotFound)?;
        let len = data.len();
        if buffer.len() < len {
            return Err(FlashError::BufferTooSmall);
        }
        buffer[..len].copy_from_slice(data);
        Ok(len)
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        map::store_item(
            &mut self.flash,
            DATA_RANGE,
            &mut self.cache,
            &mut self.buffer,
            &key,
            &data,
        )
        .await
        .map_err(map_error)
    }
}

fn map_error<E>(error: sequential_storage::Error<E>) -> FlashError {
    match error {
        sequential_storage::Error::Storage { .. } => FlashError::Flash,
        sequential_storage::Error::FullStorage => FlashError::Full,
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        _ => FlashError::Storage,
    }
}

/// Type alias used by the firmware
pub type FlashStorage<'d> = Rp2040FlashStorage<'d>;
