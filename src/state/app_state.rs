//! Shared application state handed to request handlers and input tasks

use std::{
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::TimerSnapshot;
use crate::{
    tasks::TimerCommand,
    timer::{ButtonEvent, TimerSettings},
};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("timer loop is not running")]
    TimerUnavailable,
}

/// Handles to the timer loop plus server metadata.
///
/// The timer itself lives inside the timer loop task; this only holds the
/// command sender and a watch on its latest snapshot.
#[derive(Debug)]
pub struct AppState {
    pub settings: TimerSettings,
    pub commands: mpsc::Sender<TimerCommand>,
    pub snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        settings: TimerSettings,
        commands: mpsc::Sender<TimerCommand>,
        snapshot_rx: watch::Receiver<TimerSnapshot>,
    ) -> Self {
        Self {
            settings,
            commands,
            snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Send a button event to the timer loop and wait for the resulting snapshot
    pub async fn dispatch(&self, event: ButtonEvent) -> Result<TimerSnapshot, StateError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(TimerCommand::new(event, Some(reply_tx)))
            .await
            .map_err(|_| StateError::TimerUnavailable)?;
        let snapshot = reply_rx.await.map_err(|_| StateError::TimerUnavailable)?;

        info!("Handled {} event", event.as_str());
        self.record_action(event.as_str());
        Ok(snapshot)
    }

    /// Latest snapshot published by the timer loop
    pub fn current_snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to lock last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
