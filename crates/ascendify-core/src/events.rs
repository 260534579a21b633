use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::IntervalTarget;
use crate::exercise::Exercise;
use crate::reminder::ReminderState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Warn,
}

/// Every state change in a session produces an Event.
/// Presentation layers consume them through a [`Notifier`](crate::Notifier).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Human-readable status line; `Warn` is used for rejected input.
    Status {
        level: StatusLevel,
        message: String,
        at: DateTime<Utc>,
    },
    WindowSet {
        wake: NaiveTime,
        sleep: NaiveTime,
        awake_hours: f64,
        at: DateTime<Utc>,
    },
    CadenceSet {
        interval_minutes: u32,
        at: DateTime<Utc>,
    },
    ExerciseAdded {
        exercise: String,
        goal: u32,
        at: DateTime<Utc>,
    },
    ExerciseEdited {
        exercise: String,
        goal: u32,
        at: DateTime<Utc>,
    },
    ExerciseDeleted {
        exercise: String,
        at: DateTime<Utc>,
    },
    /// Advisory per-interval targets were recomputed.
    PlanUpdated {
        targets: Vec<IntervalTarget>,
        at: DateTime<Utc>,
    },
    /// A fresh countdown began.
    CycleStarted {
        cycle: u64,
        interval_secs: u64,
        at: DateTime<Utc>,
    },
    Countdown {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Time to exercise. Waits for an acknowledgment.
    ReminderDue {
        exercise: String,
        reps_to_do: u32,
        remaining: u32,
        at: DateTime<Utc>,
    },
    RepsLogged {
        exercise: String,
        done: u32,
        remaining: u32,
        at: DateTime<Utc>,
    },
    ExerciseCompleted {
        exercise: String,
        at: DateTime<Utc>,
    },
    /// Every goal reached zero; the loop is idle again.
    AllGoalsMet {
        at: DateTime<Utc>,
    },
    /// The loop was stopped before all goals were met.
    LoopStopped {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: ReminderState,
        cycle: u64,
        remaining_secs: u64,
        interval_minutes: Option<u32>,
        awake_hours: Option<f64>,
        pending: Vec<String>,
        exercises: Vec<Exercise>,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn info(message: impl Into<String>) -> Self {
        Event::Status {
            level: StatusLevel::Info,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Event::Status {
            level: StatusLevel::Warn,
            message: message.into(),
            at: Utc::now(),
        }
    }
}
