//! Test doubles for the tracker's collaborators

use std::vec::Vec;

use stride_hal::{FlashError, FlashStorage, StepSensor, StorageKey};

use crate::readout::{Readout, StatusLine};
use crate::summary::PersistedSummary;
use crate::traits::MetricsDisplay;

/// In-memory flash with write accounting
pub struct MockFlash {
    slots: [Option<Vec<u8>>; StorageKey::ALL.len()],
    writes: usize,
    attempts: usize,
    fail_writes: bool,
    fail_at: Option<usize>,
}

impl MockFlash {
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
            writes: 0,
            attempts: 0,
            fail_writes: false,
            fail_at: None,
        }
    }

    /// Make every following write fail with `FlashError::Storage`
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make only the `n`th write attempt (counting from 1) fail with
    /// `FlashError::Full`
    pub fn fail_on_write(&mut self, n: usize) {
        self.fail_at = Some(n);
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of keys holding a value
    pub fn stored_keys(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl FlashStorage for MockFlash {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let data = self.slots[key.as_u8() as usize]
            .as_ref()
            .ok_or(FlashError::NotFound)?;
        if buffer.len() < data.len() {
            return Err(FlashError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        self.attempts += 1;
        if self.fail_at == Some(self.attempts) {
            return Err(FlashError::Full);
        }
        if self.fail_writes {
            return Err(FlashError::Storage);
        }
        self.slots[key.as_u8() as usize] = Some(data.to_vec());
        self.writes += 1;
        Ok(())
    }
}

/// Step sensor that only records registration calls
pub struct MockSensor {
    present: bool,
    registered: bool,
    pub register_calls: usize,
    pub unregister_calls: usize,
}

impl MockSensor {
    pub fn new() -> Self {
        Self {
            present: true,
            registered: false,
            register_calls: 0,
            unregister_calls: 0,
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new()
        }
    }
}

impl StepSensor for MockSensor {
    fn is_present(&self) -> bool {
        self.present
    }

    fn register(&mut self) {
        self.registered = true;
        self.register_calls += 1;
    }

    fn unregister(&mut self) {
        self.registered = false;
        self.unregister_calls += 1;
    }

    fn is_registered(&self) -> bool {
        self.registered
    }
}

/// Display that keeps everything it was shown
#[derive(Default)]
pub struct RecordingDisplay {
    pub readouts: Vec<Readout>,
    pub statuses: Vec<StatusLine>,
    pub summaries: Vec<PersistedSummary>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_readout(&self) -> Option<&Readout> {
        self.readouts.last()
    }
}

impl MetricsDisplay for RecordingDisplay {
    fn show_readout(&mut self, readout: &Readout) {
        self.readouts.push(*readout);
    }

    fn show_status(&mut self, status: StatusLine) {
        self.statuses.push(status);
    }

    fn show_summary(&mut self, summary: &PersistedSummary) {
        self.summaries.push(*summary);
    }
}
