//! Stride - Pedometer Firmware
//!
//! Main firmware binary for RP2040-based step trackers. Counts pulses from
//! a step detector, shows distance and calorie estimates and keeps the
//! last session summary in flash.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

use stride_core::config::TrackerConfig;
use stride_core::{SummaryStore, Tracker};
use stride_hal_rp2040::flash::FlashStorage;
use stride_hal_rp2040::step_input::{PulseInput, PulseStepSensor};

use crate::config::{load_config, ConfigPersistence};
use crate::display::LogDisplay;
use crate::tasks::Buttons;

// Heap allocator (postcard is built with `alloc`)
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 8KB
const HEAP_SIZE: usize = 8 * 1024;

/// Embedded default configuration (compiled into firmware)
/// Edit stride.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../stride.toml");

mod channels;
mod config;
mod display;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stride firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load configuration, then hand the flash to the summary store
    let mut persistence = ConfigPersistence::new(FlashStorage::new(p.FLASH, p.DMA_CH0));
    let config = load_config(&mut persistence, EMBEDDED_CONFIG).await;
    log_config_summary(&config);
    let storage = persistence.into_storage();

    // Step detector interrupt line (GPIO15, active high)
    let step_pin = Input::new(p.PIN_15, Pull::Down);
    let step_input = PulseInput::new(step_pin, config.sensor.debounce_ms);
    let sensor = PulseStepSensor::new(config.sensor.fitted);

    // Buttons (active low with pull-ups)
    let buttons = Buttons {
        start: Input::new(p.PIN_12, Pull::Up),
        stop: Input::new(p.PIN_13, Pull::Up),
        summary: Input::new(p.PIN_14, Pull::Up),
    };

    let tracker = Tracker::new(sensor, SummaryStore::new(storage), LogDisplay::new())
        .with_status_lines(config.display.show_status);

    // Spawn tasks
    spawner.spawn(tasks::step_input_task(step_input)).unwrap();
    spawner
        .spawn(tasks::button_task(buttons, config.start_event()))
        .unwrap();
    spawner.spawn(tasks::controller_task(tracker)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Log the active configuration
fn log_config_summary(config: &TrackerConfig) {
    info!(
        "Config: start={:?}, sensor fitted={}, debounce={}ms, status lines={}",
        config.tracker.start_action,
        config.sensor.fitted,
        config.sensor.debounce_ms,
        config.display.show_status
    );
}
