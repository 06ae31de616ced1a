//! Timer configuration values

use std::time::Duration;

use serde::Serialize;

/// Default stretch interval in seconds
pub const DEFAULT_STRETCH_SECS: u32 = 30;
/// Default pause interval in seconds
pub const DEFAULT_PAUSE_SECS: u32 = 5;
/// Seconds added to the stretch interval per up-click
pub const STRETCH_STEP_SECS: u32 = 15;
/// Seconds added to the pause interval per down-click
pub const PAUSE_STEP_SECS: u32 = 1;
/// Logical tick period
pub const TICK_PERIOD_MS: u64 = 1000;
/// Hold time after which a press counts as a long press
pub const LONG_PRESS_DELAY_MS: u64 = 3000;
/// Pause countdown values below this trigger a short warning pulse
pub const PAUSE_WARNING_SECS: u32 = 3;

/// Durations, steps and periods used by the interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSettings {
    pub default_stretch_secs: u32,
    pub default_pause_secs: u32,
    pub stretch_step_secs: u32,
    pub pause_step_secs: u32,
    #[serde(serialize_with = "serialize_millis")]
    pub tick_period: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub long_press_delay: Duration,
    pub pause_warning_secs: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_stretch_secs: DEFAULT_STRETCH_SECS,
            default_pause_secs: DEFAULT_PAUSE_SECS,
            stretch_step_secs: STRETCH_STEP_SECS,
            pause_step_secs: PAUSE_STEP_SECS,
            tick_period: Duration::from_millis(TICK_PERIOD_MS),
            long_press_delay: Duration::from_millis(LONG_PRESS_DELAY_MS),
            pause_warning_secs: PAUSE_WARNING_SECS,
        }
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_watch_constants() {
        let settings = TimerSettings::default();
        assert_eq!(settings.default_stretch_secs, 30);
        assert_eq!(settings.default_pause_secs, 5);
        assert_eq!(settings.stretch_step_secs, 15);
        assert_eq!(settings.pause_step_secs, 1);
        assert_eq!(settings.tick_period, Duration::from_millis(1000));
        assert_eq!(settings.long_press_delay, Duration::from_millis(3000));
    }

    #[test]
    fn durations_serialize_as_millis() {
        let json = serde_json::to_value(TimerSettings::default()).unwrap();
        assert_eq!(json["tick_period"], 1000);
        assert_eq!(json["long_press_delay"], 3000);
    }
}
