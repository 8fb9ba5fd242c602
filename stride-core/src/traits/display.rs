//! Display surface trait

use crate::readout::{Readout, StatusLine};
use crate::summary::PersistedSummary;

/// Trait for the surface that shows tracker output
///
/// Updates are pushed and fire-and-forget: the tracker never waits on or
/// reacts to rendering. Formatting helpers live on [`Readout`] and in
/// [`crate::readout::summary_message`].
pub trait MetricsDisplay {
    /// Show the live step count, distance and calories
    fn show_readout(&mut self, readout: &Readout);

    /// Show a session status line in place of the step count
    fn show_status(&mut self, status: StatusLine);

    /// Present the persisted summary (modal on devices that have one)
    fn show_summary(&mut self, summary: &PersistedSummary);
}

impl<T: MetricsDisplay + ?Sized> MetricsDisplay for &mut T {
    fn show_readout(&mut self, readout: &Readout) {
        (**self).show_readout(readout)
    }

    fn show_status(&mut self, status: StatusLine) {
        (**self).show_status(status)
    }

    fn show_summary(&mut self, summary: &PersistedSummary) {
        (**self).show_summary(summary)
    }
}
