//! Keyboard input task
//!
//! Reads one key per stdin line and turns it into a button press:
//! `s` or an empty line is select, `u`/`d` are up/down, and the uppercase
//! `U`/`D` hold the button long enough to reset.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::{
    state::AppState,
    timer::{Button, ButtonEvent, Press},
};

/// Map a typed line to a button press
pub fn parse_key(line: &str) -> Option<(Button, Press)> {
    match line.trim() {
        "" | "s" => Some((Button::Select, Press::Single)),
        "u" => Some((Button::Up, Press::Single)),
        "U" => Some((Button::Up, Press::Long)),
        "d" => Some((Button::Down, Press::Single)),
        "D" => Some((Button::Down, Press::Long)),
        _ => None,
    }
}

/// Background task forwarding keyboard presses to the timer loop
pub async fn keyboard_input_task(state: Arc<AppState>) {
    info!("Starting keyboard input task (s/enter = select, u/d = up/down, U/D = long press)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some((button, press)) = parse_key(&line) else {
                    warn!("Ignoring unknown key: {:?}", line);
                    continue;
                };
                let Some(event) = ButtonEvent::from_press(button, press) else {
                    debug!("No binding for {} {} press", press, button);
                    continue;
                };

                match state.dispatch(event).await {
                    Ok(snapshot) => info!(
                        "[{}] {:>2}  ({}, {})",
                        if snapshot.is_running() { "running" } else { "stopped" },
                        snapshot.labels.main,
                        snapshot.labels.stretch,
                        snapshot.labels.pause,
                    ),
                    Err(e) => {
                        warn!("Keyboard input stopped: {}", e);
                        break;
                    }
                }
            }
            Ok(None) => {
                info!("stdin closed, keyboard input stopped");
                break;
            }
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        }
    }
}
