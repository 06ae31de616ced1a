//! Timer loop background task
//!
//! Owns the interval timer and is the only place it is mutated. Button
//! commands and tick deadlines are handled strictly one at a time.

use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    host::{HostError, RuntimeHost},
    state::TimerSnapshot,
    timer::{ButtonEvent, IntervalTimer, TimerSettings},
};

const COMMAND_BUFFER: usize = 32;

/// A button event sent to the timer loop, optionally waiting for the result
#[derive(Debug)]
pub struct TimerCommand {
    pub event: ButtonEvent,
    pub reply: Option<oneshot::Sender<TimerSnapshot>>,
}

impl TimerCommand {
    pub fn new(event: ButtonEvent, reply: Option<oneshot::Sender<TimerSnapshot>>) -> Self {
        Self { event, reply }
    }
}

/// Channels and join handle of a spawned timer loop
#[derive(Debug)]
pub struct TimerLoopHandle {
    pub commands: mpsc::Sender<TimerCommand>,
    pub snapshots: watch::Receiver<TimerSnapshot>,
    /// Cancel to stop the timer and end the loop
    pub shutdown: CancellationToken,
    pub task: JoinHandle<()>,
}

/// Build the timer and spawn its loop on the current runtime
pub fn spawn_timer_loop(settings: TimerSettings) -> Result<TimerLoopHandle, HostError> {
    let timer = IntervalTimer::new(RuntimeHost::new(), settings)?;
    let (snapshot_tx, snapshots) = watch::channel(TimerSnapshot::capture(&timer));
    let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let shutdown = CancellationToken::new();
    let task = tokio::spawn(timer_loop_task(
        timer,
        command_rx,
        snapshot_tx,
        shutdown.clone(),
    ));

    Ok(TimerLoopHandle {
        commands,
        snapshots,
        shutdown,
        task,
    })
}

/// Run the timer until shutdown is requested or every command sender is dropped
pub async fn timer_loop_task(
    mut timer: IntervalTimer<RuntimeHost>,
    mut commands: mpsc::Receiver<TimerCommand>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    shutdown: CancellationToken,
) {
    info!("Starting timer loop task");

    loop {
        let deadline = timer.host().next_deadline();

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested, stopping timer loop");
                break;
            }

            command = commands.recv() => {
                let Some(command) = command else {
                    info!("Command channel closed, stopping timer loop");
                    break;
                };

                debug!("Timer loop received {:?}", command.event);
                timer.handle(command.event);
                let snapshot = publish(&timer, &snapshot_tx);

                if let Some(reply) = command.reply {
                    if reply.send(snapshot).is_err() {
                        debug!("Command sender went away before the reply");
                    }
                }
            }

            _ = wait_for(deadline) => {
                if timer.host_mut().take_due_tick().is_some() {
                    timer.on_tick();
                    publish(&timer, &snapshot_tx);
                }
            }
        }
    }

    timer.stop();
    publish(&timer, &snapshot_tx);
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn publish(
    timer: &IntervalTimer<RuntimeHost>,
    snapshot_tx: &watch::Sender<TimerSnapshot>,
) -> TimerSnapshot {
    let snapshot = TimerSnapshot::capture(timer);
    snapshot_tx.send_replace(snapshot.clone());
    snapshot
}
