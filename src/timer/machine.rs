//! Stretch/pause interval state machine

use serde::Serialize;
use tracing::{debug, info};

use super::{
    buttons::ButtonEvent,
    display::{default_layout, format_countdown, pause_label_text, stretch_label_text, LabelSlot},
    settings::TimerSettings,
};
use crate::host::{Host, HostError, TimerHandle, Vibration};

/// Which countdown is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Stretching,
    Pausing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    Stopped,
}

/// Plain copy of the timer's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerStatus {
    pub run_state: RunState,
    pub mode: TimerMode,
    pub stretch_duration_secs: u32,
    pub stretch_remaining_secs: u32,
    pub pause_duration_secs: u32,
    pub pause_remaining_secs: u32,
}

/// Interval timer alternating between a stretch and a pause countdown.
///
/// Every tick decrements the active countdown and displays it. When the
/// countdown reaches zero the same tick flips the mode, so "0" is shown
/// exactly once per interval and negative values never are.
///
/// The `on_*` methods are the only mutation entry points; the host is
/// expected to call them serially from a single event loop.
#[derive(Debug)]
pub struct IntervalTimer<H: Host> {
    host: H,
    settings: TimerSettings,
    run_state: RunState,
    mode: TimerMode,
    stretch_duration_secs: u32,
    stretch_remaining_secs: u32,
    pause_duration_secs: u32,
    pause_remaining_secs: u32,
    pending_tick: Option<TimerHandle>,
}

impl<H: Host> IntervalTimer<H> {
    /// Create the timer, lay out its labels and render their initial text.
    ///
    /// Fails only if the host cannot create a label.
    pub fn new(mut host: H, settings: TimerSettings) -> Result<Self, HostError> {
        for slot in LabelSlot::ALL {
            host.create_label(slot, &default_layout(slot))?;
        }

        let mut timer = Self {
            host,
            settings,
            run_state: RunState::Stopped,
            mode: TimerMode::Stretching,
            stretch_duration_secs: settings.default_stretch_secs,
            stretch_remaining_secs: settings.default_stretch_secs,
            pause_duration_secs: settings.default_pause_secs,
            pause_remaining_secs: settings.default_pause_secs,
            pending_tick: None,
        };
        timer.refresh_stretch_label();
        timer.refresh_pause_label();
        timer.host.render_label(LabelSlot::Main, &format_countdown(0));
        Ok(timer)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn status(&self) -> TimerStatus {
        TimerStatus {
            run_state: self.run_state,
            mode: self.mode,
            stretch_duration_secs: self.stretch_duration_secs,
            stretch_remaining_secs: self.stretch_remaining_secs,
            pause_duration_secs: self.pause_duration_secs,
            pause_remaining_secs: self.pause_remaining_secs,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Dispatch a button event to its handler
    pub fn handle(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::Toggle => self.on_toggle(),
            ButtonEvent::IncreaseStretch => self.on_increase_stretch(),
            ButtonEvent::IncreasePause => self.on_increase_pause(),
            ButtonEvent::ResetStretch => self.on_reset_stretch(),
            ButtonEvent::ResetPause => self.on_reset_pause(),
        }
    }

    pub fn on_toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Start (or resume) the stretch countdown without resetting it
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        info!("Starting stretch countdown at {}s", self.stretch_remaining_secs);
        self.run_state = RunState::Running;
        self.mode = TimerMode::Stretching;
        self.show_countdown(self.stretch_remaining_secs);
        self.schedule_next_tick();
    }

    /// Stop ticking. Countdown values are kept; stopping twice is harmless.
    pub fn stop(&mut self) {
        if self.is_running() {
            info!("Stopping timer in {:?} mode", self.mode);
        }
        self.run_state = RunState::Stopped;
        if let Some(handle) = self.pending_tick.take() {
            self.host.cancel_tick(handle);
        }
    }

    /// Called by the host when a scheduled tick fires
    pub fn on_tick(&mut self) {
        self.pending_tick = None;
        if !self.is_running() {
            debug!("Ignoring tick while stopped");
            return;
        }

        match self.mode {
            TimerMode::Stretching => {
                self.stretch_remaining_secs = self.stretch_remaining_secs.saturating_sub(1);
                self.show_countdown(self.stretch_remaining_secs);
                if self.stretch_remaining_secs == 0 {
                    self.enter(TimerMode::Pausing);
                }
            }
            TimerMode::Pausing => {
                self.pause_remaining_secs = self.pause_remaining_secs.saturating_sub(1);
                self.show_countdown(self.pause_remaining_secs);
                if self.pause_remaining_secs == 0 {
                    self.enter(TimerMode::Stretching);
                } else if self.pause_remaining_secs < self.settings.pause_warning_secs {
                    self.host.vibrate(Vibration::Short);
                }
            }
        }

        self.schedule_next_tick();
    }

    pub fn on_increase_stretch(&mut self) {
        let step = self.settings.stretch_step_secs;
        self.stretch_duration_secs = self.stretch_duration_secs.saturating_add(step);
        self.stretch_remaining_secs = self.stretch_remaining_secs.saturating_add(step);
        debug!("Stretch duration increased to {}s", self.stretch_duration_secs);
        self.refresh_stretch_label();
    }

    pub fn on_increase_pause(&mut self) {
        let step = self.settings.pause_step_secs;
        self.pause_duration_secs = self.pause_duration_secs.saturating_add(step);
        self.pause_remaining_secs = self.pause_remaining_secs.saturating_add(step);
        debug!("Pause duration increased to {}s", self.pause_duration_secs);
        self.refresh_pause_label();
    }

    pub fn on_reset_stretch(&mut self) {
        self.stretch_duration_secs = self.settings.default_stretch_secs;
        self.stretch_remaining_secs = self.stretch_remaining_secs.min(self.stretch_duration_secs);
        debug!("Stretch duration reset to {}s", self.stretch_duration_secs);
        self.refresh_stretch_label();
    }

    pub fn on_reset_pause(&mut self) {
        self.pause_duration_secs = self.settings.default_pause_secs;
        self.pause_remaining_secs = self.pause_remaining_secs.min(self.pause_duration_secs);
        debug!("Pause duration reset to {}s", self.pause_duration_secs);
        self.refresh_pause_label();
    }

    fn enter(&mut self, mode: TimerMode) {
        info!("Switching from {:?} to {:?}", self.mode, mode);
        self.host.vibrate(Vibration::Long);
        // Reseed both so a later resume never starts from zero.
        self.stretch_remaining_secs = self.stretch_duration_secs;
        self.pause_remaining_secs = self.pause_duration_secs;
        self.mode = mode;
    }

    fn schedule_next_tick(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.host.cancel_tick(handle);
        }
        self.pending_tick = Some(self.host.schedule_tick(self.settings.tick_period));
    }

    fn show_countdown(&mut self, secs: u32) {
        self.host.render_label(LabelSlot::Main, &format_countdown(secs));
    }

    fn refresh_stretch_label(&mut self) {
        let text = stretch_label_text(self.stretch_duration_secs);
        self.host.render_label(LabelSlot::Stretch, &text);
    }

    fn refresh_pause_label(&mut self) {
        let text = pause_label_text(self.pause_duration_secs);
        self.host.render_label(LabelSlot::Pause, &text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RuntimeHost;

    fn timer() -> IntervalTimer<RuntimeHost> {
        IntervalTimer::new(RuntimeHost::new(), TimerSettings::default()).unwrap()
    }

    fn tick_n(timer: &mut IntervalTimer<RuntimeHost>, n: usize) {
        for _ in 0..n {
            timer.on_tick();
        }
    }

    #[test]
    fn starts_stopped_with_defaults() {
        let timer = timer();
        let status = timer.status();
        assert_eq!(status.run_state, RunState::Stopped);
        assert_eq!(status.mode, TimerMode::Stretching);
        assert_eq!(status.stretch_duration_secs, 30);
        assert_eq!(status.stretch_remaining_secs, 30);
        assert_eq!(status.pause_duration_secs, 5);
        assert_eq!(status.pause_remaining_secs, 5);

        let labels = timer.host().labels();
        assert_eq!(labels.stretch, "Stretch Time: 30");
        assert_eq!(labels.pause, "Pause Time: 5");
        assert_eq!(labels.main, "0");
        assert_eq!(timer.host().pending_tick(), None);
    }

    #[test]
    fn init_fails_when_host_cannot_create_labels() {
        let mut host = RuntimeHost::new();
        host.create_label(LabelSlot::Pause, &default_layout(LabelSlot::Pause))
            .unwrap();
        let result = IntervalTimer::new(host, TimerSettings::default());
        assert!(matches!(result, Err(HostError::LabelExists("pause"))));
    }

    #[test]
    fn init_aborts_when_host_runs_out_of_labels() {
        let result = IntervalTimer::new(RuntimeHost::with_label_capacity(2), TimerSettings::default());
        assert!(matches!(result, Err(HostError::ResourceExhausted("text label"))));
    }

    #[test]
    fn toggle_schedules_and_cancels_ticks() {
        let mut timer = timer();
        timer.on_toggle();
        assert!(timer.is_running());
        assert!(timer.host().pending_tick().is_some());

        timer.on_toggle();
        assert!(!timer.is_running());
        assert_eq!(timer.host().pending_tick(), None);
    }

    #[test]
    fn pause_resume_without_ticks_changes_nothing() {
        let mut timer = timer();
        timer.on_increase_pause();
        let before = timer.status();

        for _ in 0..2 {
            timer.on_toggle();
            timer.on_toggle();
        }

        assert_eq!(timer.status(), before);
    }

    #[test]
    fn resume_continues_where_it_left_off() {
        let mut timer = timer();
        timer.on_toggle();
        tick_n(&mut timer, 4);
        timer.on_toggle();
        assert_eq!(timer.status().stretch_remaining_secs, 26);

        timer.on_toggle();
        assert_eq!(timer.status().stretch_remaining_secs, 26);
        assert_eq!(timer.host().labels().main, "26");
    }

    #[test]
    fn stretch_ticks_count_down_and_display() {
        let mut timer = timer();
        timer.on_toggle();
        timer.on_tick();
        assert_eq!(timer.status().stretch_remaining_secs, 29);
        assert_eq!(timer.host().labels().main, "29");
        assert_eq!(timer.host().vibration_count(), 0);
        assert!(timer.host().pending_tick().is_some());
    }

    #[test]
    fn last_stretch_second_shows_zero_and_switches_to_pause() {
        let mut timer = timer();
        timer.on_toggle();
        tick_n(&mut timer, 29);
        assert_eq!(timer.status().stretch_remaining_secs, 1);
        timer.on_increase_pause();

        timer.on_tick();

        let status = timer.status();
        assert_eq!(timer.host().labels().main, "0");
        assert_eq!(status.mode, TimerMode::Pausing);
        assert_eq!(status.pause_remaining_secs, status.pause_duration_secs);
        assert_eq!(status.pause_remaining_secs, 6);
        assert_eq!(status.stretch_remaining_secs, 30);
        assert_eq!(timer.host().vibration_count(), 1);
        assert_eq!(timer.host().last_vibration(), Some(Vibration::Long));
        assert!(timer.host().pending_tick().is_some());
    }

    #[test]
    fn pause_warns_near_zero_then_returns_to_stretch() {
        let mut timer = timer();
        timer.on_toggle();
        tick_n(&mut timer, 30);
        assert_eq!(timer.mode(), TimerMode::Pausing);
        let after_switch = timer.host().vibration_count();

        // 4, 3: silent
        tick_n(&mut timer, 2);
        assert_eq!(timer.host().vibration_count(), after_switch);

        // 2, 1: short pulses
        tick_n(&mut timer, 2);
        assert_eq!(timer.host().vibration_count(), after_switch + 2);
        assert_eq!(timer.host().last_vibration(), Some(Vibration::Short));

        // 0: long pulse and back to stretching
        timer.on_tick();
        assert_eq!(timer.host().labels().main, "0");
        assert_eq!(timer.mode(), TimerMode::Stretching);
        assert_eq!(timer.host().last_vibration(), Some(Vibration::Long));
        assert_eq!(timer.status().stretch_remaining_secs, 30);
        assert_eq!(timer.status().pause_remaining_secs, 5);
    }

    #[test]
    fn stopping_during_pause_resumes_in_stretch_mode() {
        let mut timer = timer();
        timer.on_toggle();
        tick_n(&mut timer, 31);
        assert_eq!(timer.mode(), TimerMode::Pausing);
        timer.on_toggle();

        timer.on_toggle();
        assert_eq!(timer.mode(), TimerMode::Stretching);
        assert_eq!(timer.status().stretch_remaining_secs, 30);
    }

    #[test]
    fn increase_stretch_from_defaults() {
        let mut timer = timer();
        timer.on_toggle();
        tick_n(&mut timer, 3);
        let before = timer.status().stretch_remaining_secs;

        timer.on_increase_stretch();

        let status = timer.status();
        assert_eq!(status.stretch_duration_secs, 45);
        assert_eq!(status.stretch_remaining_secs, before + 15);
        assert_eq!(timer.host().labels().stretch, "Stretch Time: 45");
        assert!(timer.is_running());
    }

    #[test]
    fn increase_pause_adds_one_second() {
        let mut timer = timer();
        timer.on_increase_pause();
        let status = timer.status();
        assert_eq!(status.pause_duration_secs, 6);
        assert_eq!(status.pause_remaining_secs, 6);
        assert_eq!(timer.host().labels().pause, "Pause Time: 6");
    }

    #[test]
    fn reset_stretch_after_three_increases_clamps_remaining() {
        let mut timer = timer();
        for _ in 0..3 {
            timer.on_increase_stretch();
        }
        assert_eq!(timer.status().stretch_duration_secs, 75);

        timer.on_reset_stretch();

        let status = timer.status();
        assert_eq!(status.stretch_duration_secs, 30);
        assert!(status.stretch_remaining_secs <= 30);
        assert_eq!(timer.host().labels().stretch, "Stretch Time: 30");
    }

    #[test]
    fn reset_keeps_remaining_below_default() {
        let mut timer = timer();
        timer.on_toggle();
        tick_n(&mut timer, 10);
        timer.on_reset_stretch();
        assert_eq!(timer.status().stretch_remaining_secs, 20);
    }

    #[test]
    fn reset_pause_is_symmetric() {
        let mut timer = timer();
        timer.on_increase_pause();
        timer.on_increase_pause();
        timer.on_reset_pause();
        let status = timer.status();
        assert_eq!(status.pause_duration_secs, 5);
        assert_eq!(status.pause_remaining_secs, 5);
        assert_eq!(timer.host().labels().pause, "Pause Time: 5");
    }

    #[test]
    fn adjustments_never_change_run_state() {
        let mut timer = timer();
        for event in [
            ButtonEvent::IncreaseStretch,
            ButtonEvent::IncreasePause,
            ButtonEvent::ResetStretch,
            ButtonEvent::ResetPause,
        ] {
            timer.handle(event);
            assert!(!timer.is_running());
        }
        assert_eq!(timer.host().pending_tick(), None);
    }

    #[test]
    fn double_stop_is_a_no_op() {
        let mut timer = timer();
        timer.start();
        timer.stop();
        let status = timer.status();
        timer.stop();
        assert_eq!(timer.status(), status);
        assert_eq!(timer.host().pending_tick(), None);
    }

    #[test]
    fn stray_tick_after_stop_does_not_reschedule() {
        let mut timer = timer();
        timer.start();
        timer.stop();
        timer.on_tick();
        assert_eq!(timer.status().stretch_remaining_secs, 30);
        assert_eq!(timer.host().pending_tick(), None);
    }

    #[test]
    fn pending_tick_is_replaced_not_duplicated() {
        let mut timer = timer();
        timer.start();
        let first = timer.host().pending_tick();
        timer.on_tick();
        let second = timer.host().pending_tick();
        assert!(second.is_some());
        assert_ne!(first, second);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stretch_countdown_never_increases_before_boundary(
                increases in 0usize..4,
                ticks in 1usize..200,
            ) {
                let mut timer = timer();
                for _ in 0..increases {
                    timer.on_increase_stretch();
                }
                timer.start();
                let mut previous = timer.status().stretch_remaining_secs;

                for _ in 0..ticks {
                    timer.on_tick();
                    let status = timer.status();
                    if status.mode == TimerMode::Pausing {
                        prop_assert_eq!(status.stretch_remaining_secs, status.stretch_duration_secs);
                        break;
                    }
                    prop_assert!(status.stretch_remaining_secs < previous);
                    previous = status.stretch_remaining_secs;
                }
            }

            #[test]
            fn exactly_one_countdown_moves_per_tick(ticks in 1usize..120) {
                let mut timer = timer();
                timer.start();
                for _ in 0..ticks {
                    let before = timer.status();
                    timer.on_tick();
                    let after = timer.status();
                    if before.mode == after.mode {
                        match before.mode {
                            TimerMode::Stretching => {
                                prop_assert_eq!(after.pause_remaining_secs, before.pause_remaining_secs);
                                prop_assert_eq!(after.stretch_remaining_secs + 1, before.stretch_remaining_secs);
                            }
                            TimerMode::Pausing => {
                                prop_assert_eq!(after.stretch_remaining_secs, before.stretch_remaining_secs);
                                prop_assert_eq!(after.pause_remaining_secs + 1, before.pause_remaining_secs);
                            }
                        }
                    }
                }
            }
        }
    }
}
