//! Read-only view of the timer published after every event

use serde::Serialize;

use crate::{
    host::{RenderedLabels, RuntimeHost, Vibration},
    timer::{IntervalTimer, TimerStatus},
};

/// Timer counters plus what the screen and motor last did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    #[serde(flatten)]
    pub status: TimerStatus,
    pub labels: RenderedLabels,
    pub last_vibration: Option<Vibration>,
    pub vibration_count: u64,
}

impl TimerSnapshot {
    pub fn capture(timer: &IntervalTimer<RuntimeHost>) -> Self {
        let host = timer.host();
        Self {
            status: timer.status(),
            labels: host.labels().clone(),
            last_vibration: host.last_vibration(),
            vibration_count: host.vibration_count(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status.run_state == crate::timer::RunState::Running
    }
}
