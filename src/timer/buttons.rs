//! Physical buttons and the events they map to

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Select,
    Up,
    Down,
}

impl FromStr for Button {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(Button::Select),
            "up" => Ok(Button::Up),
            "down" => Ok(Button::Down),
            other => Err(format!("unknown button: {}", other)),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::Select => write!(f, "select"),
            Button::Up => write!(f, "up"),
            Button::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Press {
    Single,
    Long,
}

impl Press {
    /// Classify a press by how long the button was held
    pub fn from_hold(held: Duration, long_press_delay: Duration) -> Self {
        if held >= long_press_delay {
            Press::Long
        } else {
            Press::Single
        }
    }
}

impl fmt::Display for Press {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Press::Single => write!(f, "single"),
            Press::Long => write!(f, "long"),
        }
    }
}

/// Input events understood by the interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonEvent {
    Toggle,
    IncreaseStretch,
    IncreasePause,
    ResetStretch,
    ResetPause,
}

impl ButtonEvent {
    /// Map a button press to its event. Select has no long-press binding.
    pub fn from_press(button: Button, press: Press) -> Option<Self> {
        match (button, press) {
            (Button::Select, Press::Single) => Some(ButtonEvent::Toggle),
            (Button::Select, Press::Long) => None,
            (Button::Up, Press::Single) => Some(ButtonEvent::IncreaseStretch),
            (Button::Up, Press::Long) => Some(ButtonEvent::ResetStretch),
            (Button::Down, Press::Single) => Some(ButtonEvent::IncreasePause),
            (Button::Down, Press::Long) => Some(ButtonEvent::ResetPause),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonEvent::Toggle => "toggle",
            ButtonEvent::IncreaseStretch => "increase-stretch",
            ButtonEvent::IncreasePause => "increase-pause",
            ButtonEvent::ResetStretch => "reset-stretch",
            ButtonEvent::ResetPause => "reset-pause",
        }
    }
}
