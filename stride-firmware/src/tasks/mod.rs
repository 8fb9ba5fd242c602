//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod buttons;
pub mod controller;
pub mod step_input;

pub use buttons::{button_task, Buttons};
pub use controller::{controller_task, StrideTracker};
pub use step_input::step_input_task;
