//! Async driver for a [`Session`].
//!
//! One tokio task owns the session. It waits on two sources: user commands
//! from a [`SessionHandle`] and a one-second ticker that only runs while the
//! countdown is active. Everything that mutates the session happens inside
//! that task, so commands and ticks never interleave.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::notify::Notifier;
use crate::reminder::ReminderState;
use crate::session::Session;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetWindow { wake: String, sleep: String },
    SetCadence { choice: String, custom: Option<String> },
    AddExercise { name: String, goal: String },
    EditExercise { name: String, goal: String },
    DeleteExercise { name: String },
    /// `done: None` logs the suggested per-interval reps.
    Acknowledge { exercise: String, done: Option<String> },
    Start,
    Stop,
    Snapshot,
    Plan,
    Shutdown,
}

/// Cloneable sender side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    pub fn send(&self, command: Command) -> Result<()> {
        self.tx.send(command).map_err(|_| CoreError::ChannelClosed)
    }

    pub fn set_window(&self, wake: &str, sleep: &str) -> Result<()> {
        self.send(Command::SetWindow {
            wake: wake.into(),
            sleep: sleep.into(),
        })
    }

    pub fn set_cadence(&self, choice: &str, custom: Option<&str>) -> Result<()> {
        self.send(Command::SetCadence {
            choice: choice.into(),
            custom: custom.map(Into::into),
        })
    }

    pub fn add_exercise(&self, name: &str, goal: &str) -> Result<()> {
        self.send(Command::AddExercise {
            name: name.into(),
            goal: goal.into(),
        })
    }

    pub fn acknowledge(&self, exercise: &str, done: Option<&str>) -> Result<()> {
        self.send(Command::Acknowledge {
            exercise: exercise.into(),
            done: done.map(Into::into),
        })
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }
}

/// Spawn the session task on the current tokio runtime.
///
/// The task ends on [`Command::Shutdown`] or once every handle is dropped,
/// and hands the session back through the join handle.
pub fn spawn<N>(session: Session, notifier: N) -> (SessionHandle, JoinHandle<Session>)
where
    N: Notifier + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(session, notifier, rx));
    (SessionHandle { tx }, task)
}

async fn run<N: Notifier>(
    mut session: Session,
    notifier: N,
    mut rx: mpsc::UnboundedReceiver<Command>,
) -> Session {
    let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let events = tokio::select! {
            command = rx.recv() => match command {
                None | Some(Command::Shutdown) => break,
                Some(command) => apply(&mut session, command),
            },
            _ = ticker.tick(), if session.state() == ReminderState::Running => session.tick(),
        };

        // A new countdown gets a full first second.
        if events
            .iter()
            .any(|e| matches!(e, Event::CycleStarted { .. }))
        {
            ticker.reset();
        }
        for event in &events {
            notifier.notify(event);
        }
    }

    tracing::debug!("session task finished");
    session
}

/// Apply one command to the session and collect the resulting events.
pub fn apply(session: &mut Session, command: Command) -> Vec<Event> {
    match command {
        Command::SetWindow { wake, sleep } => session.set_window(&wake, &sleep),
        Command::SetCadence { choice, custom } => session.set_cadence(&choice, custom.as_deref()),
        Command::AddExercise { name, goal } => session.add_exercise(&name, &goal),
        Command::EditExercise { name, goal } => session.edit_exercise(&name, &goal),
        Command::DeleteExercise { name } => session.delete_exercise(&name),
        Command::Acknowledge { exercise, done } => session.acknowledge(&exercise, done.as_deref()),
        Command::Start => session.start(),
        Command::Stop => session.stop(),
        Command::Snapshot => vec![session.snapshot()],
        Command::Plan => vec![Event::PlanUpdated {
            targets: session.plan(),
            at: chrono::Utc::now(),
        }],
        Command::Shutdown => Vec::new(),
    }
}
