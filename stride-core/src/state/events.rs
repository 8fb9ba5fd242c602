//! Events that drive the tracker

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // User commands
    /// Begin a new tracking session
    Start,
    /// End the current tracking session and persist its totals
    Stop,
    /// Load a fixed synthetic step count and persist it immediately
    MockRun,
    /// Present the persisted summary
    ShowSummary,

    // Sensor events
    /// One step reported by the sensor
    Step,
}

impl Event {
    /// Check if handling this event writes the summary store
    pub fn persists(&self) -> bool {
        matches!(self, Event::Stop | Event::MockRun)
    }
}
