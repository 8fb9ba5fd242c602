//! State machine definition
//!
//! Step processing, sensor registration and persistence are all a
//! function of the current state and an event. The tracker registers the
//! sensor exactly when [`TrackingState::sensor_registered`] says so.

use super::events::Event;

/// Tracker states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackingState {
    /// Not counting; sensor unregistered
    #[default]
    Idle,
    /// Counting steps; sensor registered
    Tracking,
}

impl TrackingState {
    /// Check if the sensor should be registered in this state
    pub fn sensor_registered(&self) -> bool {
        matches!(self, TrackingState::Tracking)
    }

    /// Look up an event in the transition table
    ///
    /// Returns `None` when the pair is not in the table, meaning the event
    /// must be ignored in this state.
    pub fn next_state(self, event: Event) -> Option<Self> {
        use Event::*;
        use TrackingState::*;

        match (self, event) {
            (Idle, Start) => Some(Tracking),
            (Tracking, Step) => Some(Tracking),
            (Tracking, Stop) => Some(Idle),

            // State-independent commands
            (state, MockRun) => Some(state),
            (state, ShowSummary) => Some(state),

            // Step while idle, start while tracking, stop while idle
            _ => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        self.next_state(event).unwrap_or(self)
    }
}
