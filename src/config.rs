//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::timer::{
    settings::{
        DEFAULT_PAUSE_SECS, DEFAULT_STRETCH_SECS, LONG_PRESS_DELAY_MS, PAUSE_STEP_SECS,
        PAUSE_WARNING_SECS, STRETCH_STEP_SECS, TICK_PERIOD_MS,
    },
    TimerSettings,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "stretch-timer")]
#[command(about = "A stretch/pause interval timer driven over HTTP or the keyboard")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Default stretch interval in seconds
    #[arg(long, default_value_t = DEFAULT_STRETCH_SECS, value_parser = clap::value_parser!(u32).range(1..))]
    pub stretch: u32,

    /// Default pause interval in seconds
    #[arg(long, default_value_t = DEFAULT_PAUSE_SECS, value_parser = clap::value_parser!(u32).range(1..))]
    pub pause: u32,

    /// Seconds added to the stretch interval per up press
    #[arg(long, default_value_t = STRETCH_STEP_SECS, value_parser = clap::value_parser!(u32).range(1..))]
    pub stretch_step: u32,

    /// Seconds added to the pause interval per down press
    #[arg(long, default_value_t = PAUSE_STEP_SECS, value_parser = clap::value_parser!(u32).range(1..))]
    pub pause_step: u32,

    /// Tick period in milliseconds
    #[arg(long, default_value_t = TICK_PERIOD_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Hold time in milliseconds after which a press counts as long
    #[arg(long, default_value_t = LONG_PRESS_DELAY_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub long_press_ms: u64,

    /// Read button presses from stdin (s/enter, u, d, U, D)
    #[arg(short, long)]
    pub keyboard: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            default_stretch_secs: self.stretch,
            default_pause_secs: self.pause,
            stretch_step_secs: self.stretch_step,
            pause_step_secs: self.pause_step,
            tick_period: Duration::from_millis(self.tick_ms),
            long_press_delay: Duration::from_millis(self.long_press_ms),
            pause_warning_secs: PAUSE_WARNING_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_default_settings() {
        let config = Config::try_parse_from(["stretch-timer"]).unwrap();
        assert_eq!(config.timer_settings(), TimerSettings::default());
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn overrides_flow_into_settings() {
        let config = Config::try_parse_from([
            "stretch-timer",
            "--stretch",
            "60",
            "--pause-step",
            "2",
            "--tick-ms",
            "250",
            "-v",
        ])
        .unwrap();
        let settings = config.timer_settings();
        assert_eq!(settings.default_stretch_secs, 60);
        assert_eq!(settings.pause_step_secs, 2);
        assert_eq!(settings.tick_period, Duration::from_millis(250));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_durations_are_rejected() {
        assert!(Config::try_parse_from(["stretch-timer", "--pause", "0"]).is_err());
        assert!(Config::try_parse_from(["stretch-timer", "--tick-ms", "0"]).is_err());
        assert!(Config::try_parse_from(["stretch-timer", "--long-press-ms", "0"]).is_err());
        assert!(Config::try_parse_from(["stretch-timer", "--long-press-ms", "1"]).is_ok());
    }
}
