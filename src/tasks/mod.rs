//! Background tasks module
//!
//! This module contains the timer loop that owns the interval timer and the
//! optional keyboard reader feeding it button presses.

pub mod keyboard;
pub mod timer_loop;

// Re-export main functions
pub use keyboard::keyboard_input_task;
pub use timer_loop::{spawn_timer_loop, timer_loop_task, TimerCommand, TimerLoopHandle};
