//! Main controller task
//!
//! Owns the tracker. Receives button commands and step notifications and
//! feeds them to the tracker one at a time.

use core::iter;

use defmt::*;
use embassy_futures::select::{select, Either};

use stride_core::state::Event;
use stride_core::{StoreError, Tracker};
use stride_hal_rp2040::flash::FlashStorage;
use stride_hal_rp2040::step_input::PulseStepSensor;

use crate::channels::{COMMAND_CHANNEL, STEP_CHANNEL};
use crate::display::LogDisplay;

/// Tracker wired to the board's collaborators
pub type StrideTracker = Tracker<PulseStepSensor, FlashStorage<'static>, LogDisplay>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut tracker: StrideTracker) {
    info!("Controller task started");

    if !tracker.sensor_present() {
        warn!("No step sensor fitted, sessions will not count steps");
    }

    match tracker.store_mut().try_read().await {
        Ok(summary) if summary.is_empty() => info!("No summary saved yet"),
        Ok(summary) => info!(
            "Last summary: {} steps, {} km, {} kcal",
            summary.steps, summary.distance_km, summary.calories_kcal
        ),
        Err(StoreError::Incomplete) => warn!("Last summary save was interrupted, discarded"),
        Err(e) => warn!("Failed to read summary: {:?}", e),
    }

    loop {
        match select(COMMAND_CHANNEL.receive(), STEP_CHANNEL.receive()).await {
            Either::First(event) => {
                // Steps queued before the command belong to the session
                // it may end
                let counted = tracker.drain(iter::from_fn(|| STEP_CHANNEL.try_receive().ok()));
                if counted > 0 {
                    trace!("{} queued step(s) counted before {:?}", counted, event);
                }
                handle_command(&mut tracker, event).await;
            }
            Either::Second(sensor_event) => {
                tracker.on_sensor_event(sensor_event);
            }
        }
    }
}

async fn handle_command(tracker: &mut StrideTracker, event: Event) {
    debug!("Command: {:?} in {:?}", event, tracker.state());

    match tracker.handle(event).await {
        Ok(true) => {
            if event.persists() {
                info!("Summary saved ({} steps)", tracker.steps());
            }
        }
        Ok(false) => {
            debug!("{:?} ignored in {:?}", event, tracker.state());
        }
        Err(e) => {
            error!("Failed to save summary: {:?}", e);
        }
    }
}
