//! GPIO step pulse sensor
//!
//! The step detector (a pedometer IC or an accelerometer with a step
//! engine) raises one pulse per detected step on its interrupt line.
//! Edge waiting happens in a firmware task; this module owns the
//! registration flag the task consults and the debounce logic.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};

/// Set while a tracker has the sensor registered
static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Check if step pulses should currently be forwarded
pub fn is_registered() -> bool {
    REGISTERED.load(Ordering::Acquire)
}

/// Handle to the pulse step sensor
///
/// Registration only flips a flag; the pulse task keeps running and drops
/// pulses while unregistered.
pub struct PulseStepSensor {
    present: bool,
}

impl PulseStepSensor {
    /// Create the sensor handle
    ///
    /// `present` comes from the board configuration: a board without a
    /// fitted step detector has a floating line that must be ignored.
    pub fn new(present: bool) -> Self {
        REGISTERED.store(false, Ordering::Release);
        Self { present }
    }
}

impl stride_hal::StepSensor for PulseStepSensor {
    fn is_present(&self) -> bool {
        self.present
    }

    fn register(&mut self) {
        REGISTERED.store(true, Ordering::Release);
    }

    fn unregister(&mut self) {
        REGISTERED.store(false, Ordering::Release);
    }

    fn is_registered(&self) -> bool {
        is_registered()
    }
}

/// Rising-edge pulse reader with a minimum pulse spacing
pub struct PulseInput<'d> {
    pin: Input<'d>,
    debounce: Duration,
    last_pulse: Option<Instant>,
}

impl<'d> PulseInput<'d> {
    /// Wrap an input pin
    pub fn new(pin: Input<'d>, debounce_ms: u16) -> Self {
        Self {
            pin,
            debounce: Duration::from_millis(debounce_ms as u64),
            last_pulse: None,
        }
    }

    /// Wait for the next accepted pulse
    ///
    /// Edges closer than the debounce window to the previous accepted
    /// pulse are treated as contact bounce and skipped.
    pub async fn next_pulse(&mut self) -> Instant {
        loop {
            self.pin.wait_for_rising_edge().await;
            let now = Instant::now();

            let bounced = self
                .last_pulse
                .is_some_and(|last| now.duration_since(last) < self.debounce);
            if bounced {
                continue;
            }

            self.last_pulse = Some(now);
            return now;
        }
    }
}
