//! Host backed by tokio time, rendering into memory and the log

use std::{collections::HashMap, time::Duration};

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info};

use super::{Host, HostError, TimerHandle, Vibration};
use crate::timer::display::{LabelLayout, LabelSlot};

/// Current text of every label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedLabels {
    pub stretch: String,
    pub pause: String,
    pub main: String,
}

impl RenderedLabels {
    pub fn get(&self, slot: LabelSlot) -> &str {
        match slot {
            LabelSlot::Stretch => &self.stretch,
            LabelSlot::Pause => &self.pause,
            LabelSlot::Main => &self.main,
        }
    }

    fn set(&mut self, slot: LabelSlot, text: &str) {
        let target = match slot {
            LabelSlot::Stretch => &mut self.stretch,
            LabelSlot::Pause => &mut self.pause,
            LabelSlot::Main => &mut self.main,
        };
        text.clone_into(target);
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTick {
    handle: TimerHandle,
    deadline: Instant,
}

/// Host used by the timer loop task.
///
/// At most one tick is pending at a time; the loop sleeps until
/// [`RuntimeHost::next_deadline`] and then calls [`RuntimeHost::take_due_tick`]
/// before handing the tick to the timer.
#[derive(Debug)]
pub struct RuntimeHost {
    layouts: HashMap<LabelSlot, LabelLayout>,
    label_capacity: usize,
    labels: RenderedLabels,
    pending: Option<PendingTick>,
    next_handle: u64,
    last_vibration: Option<Vibration>,
    vibration_count: u64,
}

impl Default for RuntimeHost {
    fn default() -> Self {
        Self::with_label_capacity(LabelSlot::ALL.len())
    }
}

impl RuntimeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that can allocate at most `label_capacity` labels
    pub fn with_label_capacity(label_capacity: usize) -> Self {
        Self {
            layouts: HashMap::new(),
            label_capacity,
            labels: RenderedLabels::default(),
            pending: None,
            next_handle: 0,
            last_vibration: None,
            vibration_count: 0,
        }
    }

    pub fn labels(&self) -> &RenderedLabels {
        &self.labels
    }

    pub fn layout(&self, slot: LabelSlot) -> Option<&LabelLayout> {
        self.layouts.get(&slot)
    }

    pub fn last_vibration(&self) -> Option<Vibration> {
        self.last_vibration
    }

    pub fn vibration_count(&self) -> u64 {
        self.vibration_count
    }

    pub fn pending_tick(&self) -> Option<TimerHandle> {
        self.pending.map(|tick| tick.handle)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|tick| tick.deadline)
    }

    /// Consume the pending tick if its deadline has passed
    pub fn take_due_tick(&mut self) -> Option<TimerHandle> {
        match self.pending {
            Some(tick) if tick.deadline <= Instant::now() => {
                self.pending = None;
                Some(tick.handle)
            }
            _ => None,
        }
    }
}

impl Host for RuntimeHost {
    fn create_label(&mut self, slot: LabelSlot, layout: &LabelLayout) -> Result<(), HostError> {
        if self.layouts.contains_key(&slot) {
            return Err(HostError::LabelExists(slot.as_str()));
        }
        if self.layouts.len() >= self.label_capacity {
            return Err(HostError::ResourceExhausted("text label"));
        }
        debug!("Created {} label at {:?}", slot.as_str(), layout.frame);
        self.layouts.insert(slot, *layout);
        Ok(())
    }

    fn render_label(&mut self, slot: LabelSlot, text: &str) {
        debug!("Label {} -> {:?}", slot.as_str(), text);
        self.labels.set(slot, text);
    }

    fn schedule_tick(&mut self, delay: Duration) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        if let Some(previous) = self.pending.replace(PendingTick {
            handle,
            deadline: Instant::now() + delay,
        }) {
            debug!("Tick {} superseded by {}", previous.handle, handle);
        }
        handle
    }

    fn cancel_tick(&mut self, handle: TimerHandle) {
        match self.pending {
            Some(tick) if tick.handle == handle => {
                debug!("Cancelled tick {}", handle);
                self.pending = None;
            }
            _ => debug!("Tick {} already fired or cancelled", handle),
        }
    }

    fn vibrate(&mut self, pattern: Vibration) {
        info!("Vibrating: {:?} pulse", pattern);
        self.last_vibration = Some(pattern);
        self.vibration_count += 1;
    }
}
