//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use stride_core::state::Event;
use stride_hal::SensorEvent;

/// Channel capacity for button commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for step pulses (a brisk walk is ~2 steps/s)
const STEP_CHANNEL_SIZE: usize = 32;

/// User commands from the buttons
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Event, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Step notifications from the sensor task, consumed in FIFO order
pub static STEP_CHANNEL: Channel<CriticalSectionRawMutex, SensorEvent, STEP_CHANNEL_SIZE> =
    Channel::new();
