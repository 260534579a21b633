//! Reminder engine implementation.
//!
//! The engine is a tick-driven state machine. It has no internal thread or
//! timer: the caller invokes `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> AwaitingAck -> (Running | Idle)
//! ```
//!
//! `ensure_running()` is the only way out of `Idle` and does nothing in any
//! other state, so a session never has more than one countdown.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = ReminderEngine::new();
//! engine.ensure_running(&book, Some(&window), Some(cadence));
//! // Once per second:
//! let events = engine.tick(&book, Some(&window));
//! // When the user logs reps:
//! let events = engine.resolve("Push-ups", book.has_outstanding());
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calculator::reps_per_interval;
use crate::events::Event;
use crate::exercise::ExerciseBook;
use crate::schedule::{AwakeWindow, Cadence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderState {
    /// No countdown. Either nothing is owed or the loop was stopped.
    Idle,
    /// Counting down to the next reminder.
    Running,
    /// Reminders were emitted and at least one is unacknowledged.
    AwaitingAck,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderEngine {
    state: ReminderState,
    cadence: Option<Cadence>,
    /// Seconds left in the current countdown.
    remaining_secs: u64,
    /// Exercises reminded this cycle that have not been acknowledged.
    pending: Vec<String>,
    /// Number of countdowns started so far.
    cycle: u64,
}

impl Default for ReminderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderEngine {
    pub fn new() -> Self {
        Self {
            state: ReminderState::Idle,
            cadence: None,
            remaining_secs: 0,
            pending: Vec::new(),
            cycle: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ReminderState::Idle
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the loop if it is idle and there is something to remind about.
    ///
    /// Requires a window, a cadence and at least one outstanding exercise.
    /// Returns `None` when nothing changed.
    pub fn ensure_running(
        &mut self,
        book: &ExerciseBook,
        window: Option<&AwakeWindow>,
        cadence: Option<Cadence>,
    ) -> Option<Event> {
        if self.state != ReminderState::Idle {
            return None;
        }
        window?;
        let cadence = cadence?;
        if !book.has_outstanding() {
            return None;
        }
        self.cadence = Some(cadence);
        tracing::debug!(interval_minutes = cadence.minutes(), "arming reminder loop");
        Some(self.begin_countdown())
    }

    /// Swap the cadence. A running countdown restarts with the new interval;
    /// while awaiting acknowledgments the change applies to the next cycle.
    pub fn set_cadence(&mut self, cadence: Cadence) -> Option<Event> {
        self.cadence = Some(cadence);
        if self.state == ReminderState::Running {
            return Some(self.restart_countdown());
        }
        None
    }

    /// Advance the countdown by one second.
    ///
    /// Emits a `Countdown` every second and, when the countdown reaches zero,
    /// one `ReminderDue` per outstanding exercise.
    pub fn tick(&mut self, book: &ExerciseBook, window: Option<&AwakeWindow>) -> Vec<Event> {
        if self.state != ReminderState::Running {
            return Vec::new();
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        let mut events = vec![Event::Countdown {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }];
        if self.remaining_secs == 0 {
            events.extend(self.fire(book, window));
        }
        events
    }

    /// Mark an exercise's reminder as handled.
    ///
    /// When the last pending reminder of a cycle is resolved the loop either
    /// re-arms or goes idle, depending on `has_outstanding`.
    pub fn resolve(&mut self, exercise: &str, has_outstanding: bool) -> Vec<Event> {
        if self.state != ReminderState::AwaitingAck {
            return Vec::new();
        }
        self.pending.retain(|name| name != exercise);
        if self.pending.is_empty() {
            self.finish_cycle(has_outstanding)
        } else {
            Vec::new()
        }
    }

    /// Cancel the loop. Pending reminders are dropped.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state == ReminderState::Idle {
            return None;
        }
        self.state = ReminderState::Idle;
        self.remaining_secs = 0;
        self.pending.clear();
        Some(Event::LoopStopped { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin_countdown(&mut self) -> Event {
        self.cycle += 1;
        self.restart_countdown()
    }

    fn restart_countdown(&mut self) -> Event {
        let interval_secs = self.cadence.map(|c| c.seconds()).unwrap_or(0);
        self.state = ReminderState::Running;
        self.remaining_secs = interval_secs;
        Event::CycleStarted {
            cycle: self.cycle,
            interval_secs,
            at: Utc::now(),
        }
    }

    fn fire(&mut self, book: &ExerciseBook, window: Option<&AwakeWindow>) -> Vec<Event> {
        let minutes = self.cadence.map(|c| c.minutes()).unwrap_or(0);
        let hours = window.map(AwakeWindow::awake_hours).unwrap_or(0.0);

        let mut events = Vec::new();
        self.pending.clear();
        for exercise in book.outstanding() {
            // Based on the daily goal, not on what is left.
            let reps_to_do = reps_per_interval(exercise.goal, hours, minutes).unwrap_or(0);
            tracing::info!(exercise = %exercise.name, reps_to_do, "reminder due");
            self.pending.push(exercise.name.clone());
            events.push(Event::ReminderDue {
                exercise: exercise.name.clone(),
                reps_to_do,
                remaining: exercise.remaining,
                at: Utc::now(),
            });
        }

        self.state = ReminderState::AwaitingAck;
        if self.pending.is_empty() {
            events.extend(self.finish_cycle(false));
        }
        events
    }

    fn finish_cycle(&mut self, has_outstanding: bool) -> Vec<Event> {
        if has_outstanding {
            vec![self.begin_countdown()]
        } else {
            tracing::info!(cycles = self.cycle, "all goals met, reminder loop idle");
            self.state = ReminderState::Idle;
            self.remaining_secs = 0;
            vec![Event::AllGoalsMet { at: Utc::now() }]
        }
    }
}
