//! Tracking state machine
//!
//! Two states, one transition table. Every (state, event) pair that is not
//! in the table is a defined no-op rather than an error.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::TrackingState;
