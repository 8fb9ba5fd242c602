//! Step pulse task
//!
//! Waits for pulses from the step detector and forwards them to the
//! controller while the sensor is registered.

use defmt::*;

use stride_hal::SensorEvent;
use stride_hal_rp2040::step_input::{is_registered, PulseInput};

use crate::channels::STEP_CHANNEL;

/// Step input task
#[embassy_executor::task]
pub async fn step_input_task(mut input: PulseInput<'static>) {
    info!("Step input task started");

    let mut dropped: u32 = 0;

    loop {
        input.next_pulse().await;

        if !is_registered() {
            continue;
        }

        if STEP_CHANNEL.try_send(SensorEvent::Step).is_err() {
            dropped = dropped.saturating_add(1);
            warn!("Step queue full, {} pulse(s) dropped", dropped);
        }
    }
}
