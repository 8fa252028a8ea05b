//! Tracking state machine and timer

pub mod actions;
pub mod timer;

pub use actions::{TrackingAction, TrackingState};
pub use timer::TimeTracker;
