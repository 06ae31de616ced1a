//! Host interface module
//!
//! The interval timer never talks to a screen, a vibration motor or a clock
//! directly. Everything it needs from the outside world goes through the
//! [`Host`] trait, and the host in turn calls the timer's `on_*` entry points.

pub mod runtime;

use std::{fmt, time::Duration};

use serde::Serialize;
use thiserror::Error;

use crate::timer::display::{LabelLayout, LabelSlot};

pub use runtime::{RenderedLabels, RuntimeHost};

/// Opaque handle for a scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Haptic pulse patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vibration {
    Short,
    Long,
}

/// Failures raised by a host while setting up display resources
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("label slot `{0}` was already created")]
    LabelExists(&'static str),

    #[error("host could not allocate {0}")]
    ResourceExhausted(&'static str),
}

/// Side effects and scheduling supplied by the runtime hosting the timer
pub trait Host {
    /// Allocate and style a text label. Called once per slot at startup.
    fn create_label(&mut self, slot: LabelSlot, layout: &LabelLayout) -> Result<(), HostError>;

    fn render_label(&mut self, slot: LabelSlot, text: &str);

    /// Arrange for the timer's `on_tick` to be called once after `delay`
    fn schedule_tick(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a scheduled tick. Unknown, fired or cancelled handles are ignored.
    fn cancel_tick(&mut self, handle: TimerHandle);

    fn vibrate(&mut self, pattern: Vibration);
}
