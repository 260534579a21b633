//! # Ascendify Core Library
//!
//! Business logic for Ascendify, a daily exercise reminder. The user sets a
//! wake/sleep window, registers exercises with daily rep goals and picks a
//! reminder frequency; the app prompts them every interval to log reps until
//! each goal is met.
//!
//! ## Architecture
//!
//! - **Interval Calculator**: advisory reps-per-reminder from goal, awake
//!   hours and cadence
//! - **Reminder Engine**: a tick-driven state machine with a single,
//!   idempotently armed countdown
//! - **Session**: owns the exercises and the engine; turns user text into
//!   validated state changes and events
//! - **Runtime**: a tokio task that feeds the session commands and one-second
//!   ticks, delivering events to a [`Notifier`]
//!
//! ## Key Components
//!
//! - [`ExerciseBook`]: Exercise CRUD and rep accounting
//! - [`ReminderEngine`]: Countdown and reminder state machine
//! - [`Session`]: Validated user operations
//! - [`Config`]: Preferences file

pub mod calculator;
pub mod error;
pub mod events;
pub mod exercise;
pub mod notify;
pub mod reminder;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod storage;

pub use calculator::{reps_per_interval, IntervalTarget};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{Event, StatusLevel};
pub use exercise::{Exercise, ExerciseBook, RepLog};
pub use notify::{ChannelNotifier, FanOut, Notifier, TracingNotifier};
pub use reminder::{ReminderEngine, ReminderState};
pub use runtime::{Command, SessionHandle};
pub use schedule::{AwakeWindow, Cadence};
pub use session::Session;
pub use storage::Config;
