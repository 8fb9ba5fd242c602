//! Log-backed display surface
//!
//! Renders tracker output through defmt. The board has no screen of its
//! own; a host attached over RTT sees the same texts a panel would.

use defmt::*;

use stride_core::readout::{summary_message, Readout, StatusLine, SUMMARY_TITLE};
use stride_core::summary::PersistedSummary;
use stride_core::traits::MetricsDisplay;

/// Display surface that writes to the defmt log
#[derive(Default)]
pub struct LogDisplay {
    /// Readouts pushed since boot
    updates: u32,
}

impl LogDisplay {
    pub const fn new() -> Self {
        Self { updates: 0 }
    }
}

impl MetricsDisplay for LogDisplay {
    fn show_readout(&mut self, readout: &Readout) {
        self.updates = self.updates.wrapping_add(1);
        info!(
            "[{}] {} | {} | {}",
            self.updates,
            readout.steps_text().as_str(),
            readout.distance_text().as_str(),
            readout.calories_text().as_str()
        );
    }

    fn show_status(&mut self, status: StatusLine) {
        info!("{}", status.text());
    }

    fn show_summary(&mut self, summary: &PersistedSummary) {
        info!("== {} ==", SUMMARY_TITLE);
        for line in summary_message(summary).lines() {
            info!("{}", line);
        }
    }
}
