//! Summary persistence
//!
//! Sole owner of the `steps`/`distance`/`calories` keys. Values are
//! postcard-encoded scalars, one per key.
//!
//! Flash only guarantees atomic writes per key, so a save is bracketed by a
//! commit marker: `Writing` before the three values and `Complete` after
//! them. A marker left at `Writing` means the save stopped partway and the
//! keys may mix two records; such a summary is never returned.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stride_hal::{FlashError, FlashStorage, StorageKey};

use super::record::PersistedSummary;

/// Maximum encoded size of a single summary value
pub const MAX_VALUE_SIZE: usize = 16;

/// Summary persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash operation failed
    Flash(FlashError),
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// The last save did not finish; the stored keys are not one record
    Incomplete,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

/// Progress of a summary save, stored under [`StorageKey::SummaryCommit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum SaveMarker {
    /// Values are being overwritten
    Writing,
    /// All three values belong to the same record
    Complete,
}

/// Key-value store for the last session summary
pub struct SummaryStore<F> {
    storage: F,
}

impl<F: FlashStorage> SummaryStore<F> {
    /// Create a store over a flash storage backend
    pub fn new(storage: F) -> Self {
        Self { storage }
    }

    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut F {
        &mut self.storage
    }

    /// Overwrite the persisted summary
    ///
    /// Distance and calories are narrowed to `f32`.
    pub async fn write(
        &mut self,
        steps: u32,
        distance_km: f64,
        calories_kcal: f64,
    ) -> Result<(), StoreError> {
        self.write_summary(&PersistedSummary::new(steps, distance_km, calories_kcal))
            .await
    }

    /// Overwrite the persisted summary with a ready-made record
    ///
    /// If this fails after the first write, the store reads as empty until
    /// the next successful save.
    pub async fn write_summary(&mut self, summary: &PersistedSummary) -> Result<(), StoreError> {
        self.write_value(StorageKey::SummaryCommit, &SaveMarker::Writing)
            .await?;
        self.write_value(StorageKey::Steps, &summary.steps).await?;
        self.write_value(StorageKey::Distance, &summary.distance_km)
            .await?;
        self.write_value(StorageKey::Calories, &summary.calories_kcal)
            .await?;
        self.write_value(StorageKey::SummaryCommit, &SaveMarker::Complete)
            .await
    }

    /// Read the persisted summary
    ///
    /// Never fails: a key that was never written, or cannot be read back,
    /// takes its zero default. An interrupted save reads as all zeros.
    pub async fn read(&mut self) -> PersistedSummary {
        if self.check_commit().await.is_err() {
            return PersistedSummary::default();
        }

        PersistedSummary {
            steps: self.read_value(StorageKey::Steps).await.unwrap_or(0),
            distance_km: self.read_value(StorageKey::Distance).await.unwrap_or(0.0),
            calories_kcal: self.read_value(StorageKey::Calories).await.unwrap_or(0.0),
        }
    }

    /// Read the persisted summary, reporting storage and decode failures
    ///
    /// Missing keys still read as zero; only real failures and interrupted
    /// saves are errors.
    pub async fn try_read(&mut self) -> Result<PersistedSummary, StoreError> {
        self.check_commit().await?;

        Ok(PersistedSummary {
            steps: self.read_or_default(StorageKey::Steps).await?,
            distance_km: self.read_or_default(StorageKey::Distance).await?,
            calories_kcal: self.read_or_default(StorageKey::Calories).await?,
        })
    }

    /// Fail if the last save was interrupted
    ///
    /// A missing marker is accepted: keys written without one are read
    /// individually.
    async fn check_commit(&mut self) -> Result<(), StoreError> {
        match self.read_value(StorageKey::SummaryCommit).await {
            Ok(SaveMarker::Complete) | Err(StoreError::Flash(FlashError::NotFound)) => Ok(()),
            Ok(SaveMarker::Writing) => Err(StoreError::Incomplete),
            Err(e) => Err(e),
        }
    }

    async fn read_or_default<T: DeserializeOwned + Default>(
        &mut self,
        key: StorageKey,
    ) -> Result<T, StoreError> {
        match self.read_value(key).await {
            Err(StoreError::Flash(FlashError::NotFound)) => Ok(T::default()),
            other => other,
        }
    }

    async fn read_value<T: DeserializeOwned>(&mut self, key: StorageKey) -> Result<T, StoreError> {
        let mut buffer = [0u8; MAX_VALUE_SIZE];
        let len = self.storage.read(key, &mut buffer).await?;
        postcard::from_bytes(&buffer[..len]).map_err(|_| StoreError::Deserialize)
    }

    async fn write_value<T: Serialize>(&mut self, key: StorageKey, value: &T) -> Result<(), StoreError> {
        let mut buffer = [0u8; MAX_VALUE_SIZE];
        let bytes = postcard::to_slice(value, &mut buffer).map_err(|_| StoreError::Serialize)?;
        self.storage.write(key, bytes).await?;
        Ok(())
    }
}
