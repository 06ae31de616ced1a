//! Stretch Timer - alternating stretch and pause countdowns
//!
//! This library provides the interval timer state machine, the host
//! interface it drives, and a tokio runtime that feeds it button presses
//! from HTTP requests or the keyboard.

pub mod config;
pub mod host;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use host::{Host, HostError, RuntimeHost};
pub use timer::{ButtonEvent, IntervalTimer, TimerSettings};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
