//! Interval timer module
//!
//! This module contains the stretch/pause state machine together with the
//! settings, button mapping and label formatting it relies on.

pub mod buttons;
pub mod display;
pub mod machine;
pub mod settings;

// Re-export main types
pub use buttons::{Button, ButtonEvent, Press};
pub use machine::{IntervalTimer, RunState, TimerMode, TimerStatus};
pub use settings::TimerSettings;
