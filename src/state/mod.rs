//! State management module
//!
//! This module contains the shared handles to the timer loop and the
//! snapshot it publishes.

pub mod app_state;
pub mod snapshot;

// Re-export main types
pub use app_state::{AppState, StateError};
pub use snapshot::TimerSnapshot;
