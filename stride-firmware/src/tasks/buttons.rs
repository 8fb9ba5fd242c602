//! Button input task
//!
//! Three active-low buttons: start, stop and summary. Presses become
//! tracker events on the command channel.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use stride_core::state::Event;

use crate::channels::COMMAND_CHANNEL;

/// Settle time after a press before the next one is accepted
const DEBOUNCE_MS: u64 = 50;

/// Button inputs
pub struct Buttons {
    pub start: Input<'static>,
    pub stop: Input<'static>,
    pub summary: Input<'static>,
}

/// Button task
///
/// `start_event` is [`Event::Start`] or, on bench setups, [`Event::MockRun`].
#[embassy_executor::task]
pub async fn button_task(mut buttons: Buttons, start_event: Event) {
    info!("Button task started (start button -> {:?})", start_event);

    loop {
        let event = match select3(
            buttons.start.wait_for_falling_edge(),
            buttons.stop.wait_for_falling_edge(),
            buttons.summary.wait_for_falling_edge(),
        )
        .await
        {
            Either3::First(()) => start_event,
            Either3::Second(()) => Event::Stop,
            Either3::Third(()) => Event::ShowSummary,
        };

        debug!("Button: {:?}", event);
        COMMAND_CHANNEL.send(event).await;

        Timer::after_millis(DEBOUNCE_MS).await;
    }
}
