mod engine;

pub use engine::{ReminderEngine, ReminderState};
