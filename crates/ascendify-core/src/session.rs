//! A single user's day: exercises, awake window, cadence and the reminder loop.
//!
//! Every operation takes raw user text, validates it and returns the events it
//! produced. Rejected input becomes a `Status` event with level `Warn` and
//! leaves the session untouched; unknown exercise names are ignored.

use chrono::Utc;

use crate::calculator::{self, IntervalTarget};
use crate::error::ValidationError;
use crate::events::Event;
use crate::exercise::{parse_done, parse_goal, ExerciseBook};
use crate::reminder::{ReminderEngine, ReminderState};
use crate::schedule::{AwakeWindow, Cadence};

#[derive(Debug, Clone, Default)]
pub struct Session {
    book: ExerciseBook,
    window: Option<AwakeWindow>,
    cadence: Option<Cadence>,
    engine: ReminderEngine,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn exercises(&self) -> &ExerciseBook {
        &self.book
    }

    pub fn window(&self) -> Option<&AwakeWindow> {
        self.window.as_ref()
    }

    pub fn cadence(&self) -> Option<Cadence> {
        self.cadence
    }

    pub fn state(&self) -> ReminderState {
        self.engine.state()
    }

    pub fn engine(&self) -> &ReminderEngine {
        &self.engine
    }

    pub fn plan(&self) -> Vec<IntervalTarget> {
        calculator::plan(&self.book, self.window.as_ref(), self.cadence)
    }

    /// Reps suggested for one reminder of `exercise`, if it can be computed.
    pub fn suggested_reps(&self, exercise: &str) -> Option<u32> {
        let goal = self.book.get(exercise)?.goal;
        let window = self.window.as_ref()?;
        calculator::reps_per_interval(goal, window.awake_hours(), self.cadence?.minutes())
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.engine.state(),
            cycle: self.engine.cycle(),
            remaining_secs: self.engine.remaining_secs(),
            interval_minutes: self.cadence.map(|c| c.minutes()),
            awake_hours: self.window.as_ref().map(AwakeWindow::awake_hours),
            pending: self.engine.pending().to_vec(),
            exercises: self.book.iter().cloned().collect(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_window(&mut self, wake: &str, sleep: &str) -> Vec<Event> {
        let window = match AwakeWindow::parse(wake, sleep) {
            Ok(window) => window,
            Err(err) => {
                let message = match err {
                    ValidationError::EmptyWindow => "Wake and sleep times must differ.",
                    _ => "Please enter valid wake and sleep times in HH:MM format.",
                };
                return rejected(err, message);
            }
        };
        self.window = Some(window);

        let mut events = vec![
            Event::WindowSet {
                wake: window.wake(),
                sleep: window.sleep(),
                awake_hours: window.awake_hours(),
                at: Utc::now(),
            },
            Event::info(format!(
                "Awake time set: {:.1} hours. Add exercises and select reminder frequency.",
                window.awake_hours()
            )),
        ];
        self.refresh(&mut events);
        events
    }

    /// `choice` is a preset or `custom`; see [`Cadence::parse`].
    pub fn set_cadence(&mut self, choice: &str, custom_minutes: Option<&str>) -> Vec<Event> {
        let cadence = match Cadence::parse(choice, custom_minutes) {
            Ok(cadence) => cadence,
            Err(err @ ValidationError::UnknownCadence(_)) => {
                let message = format!("{}.", capitalize(&err.to_string()));
                return rejected(err, &message);
            }
            Err(err) => return rejected(err, "Enter a valid custom interval in minutes."),
        };
        self.cadence = Some(cadence);

        let mut events = vec![
            Event::CadenceSet {
                interval_minutes: cadence.minutes(),
                at: Utc::now(),
            },
            Event::info(format!(
                "Reminder interval set to {} minutes.",
                cadence.minutes()
            )),
        ];
        events.extend(self.engine.set_cadence(cadence));
        self.refresh(&mut events);
        events
    }

    pub fn add_exercise(&mut self, name: &str, goal: &str) -> Vec<Event> {
        let goal = match parse_goal("rep goal", goal) {
            Ok(goal) => goal,
            Err(err @ ValidationError::NotANumber { .. }) => {
                return rejected(err, "Please enter a number for the rep goal.")
            }
            Err(err) => return rejected(err, "Please enter a valid exercise name and rep goal."),
        };
        let exercise = match self.book.add(name, goal) {
            Ok(exercise) => exercise.name.clone(),
            Err(err) => return rejected(err, "Please enter a valid exercise name and rep goal."),
        };
        tracing::info!(%exercise, goal, "exercise added");

        let mut events = vec![
            Event::ExerciseAdded {
                exercise: exercise.clone(),
                goal,
                at: Utc::now(),
            },
            Event::info(format!(
                "{exercise} with {goal} reps added. Select reminder frequency and start."
            )),
        ];
        self.refresh(&mut events);
        events
    }

    pub fn edit_exercise(&mut self, name: &str, goal: &str) -> Vec<Event> {
        let name = name.trim();
        let goal = match parse_goal("rep goal", goal) {
            Ok(goal) => goal,
            Err(err) => return rejected(err, "Please enter a valid number for the new goal."),
        };
        match self.book.edit(name, goal) {
            Ok(Some(_)) => {}
            Ok(None) => return Vec::new(),
            Err(err) => return rejected(err, "Please enter a valid number for the new goal."),
        }
        tracing::info!(exercise = name, goal, "exercise edited");

        let mut events = vec![
            Event::ExerciseEdited {
                exercise: name.to_string(),
                goal,
                at: Utc::now(),
            },
            Event::info(format!("Goal updated for {name} to {goal} reps.")),
        ];
        self.refresh(&mut events);
        events
    }

    pub fn delete_exercise(&mut self, name: &str) -> Vec<Event> {
        let name = name.trim();
        if self.book.delete(name).is_none() {
            return Vec::new();
        }
        tracing::info!(exercise = name, "exercise deleted");

        let mut events = vec![
            Event::ExerciseDeleted {
                exercise: name.to_string(),
                at: Utc::now(),
            },
            Event::info(format!("{name} deleted from your goals.")),
        ];
        events.extend(self.engine.resolve(name, self.book.has_outstanding()));
        // A delete never re-arms a stopped loop.
        self.replan(&mut events);
        events
    }

    /// Log reps done for `exercise`.
    ///
    /// Without `done` the suggested per-interval amount is logged.
    pub fn acknowledge(&mut self, exercise: &str, done: Option<&str>) -> Vec<Event> {
        let exercise = exercise.trim();
        let done = match done {
            Some(text) => match parse_done(text) {
                Ok(done) => done,
                Err(err) => {
                    return rejected(err, "Please enter a whole number of reps completed.")
                }
            },
            None => self.suggested_reps(exercise).unwrap_or(0),
        };
        let Some(log) = self.book.log_reps(exercise, done) else {
            return Vec::new();
        };

        let mut events = vec![Event::RepsLogged {
            exercise: exercise.to_string(),
            done: log.logged,
            remaining: log.remaining,
            at: Utc::now(),
        }];
        if log.just_completed {
            tracing::info!(exercise, "goal complete");
            events.push(Event::ExerciseCompleted {
                exercise: exercise.to_string(),
                at: Utc::now(),
            });
        }
        if log.remaining == 0 {
            events.push(Event::info(format!("{exercise} goal complete!")));
        } else {
            events.push(Event::info(format!(
                "{} reps remaining for {exercise}.",
                log.remaining
            )));
        }
        events.extend(self.engine.resolve(exercise, self.book.has_outstanding()));
        events
    }

    /// Explicitly arm the loop, explaining what is missing if it cannot run.
    pub fn start(&mut self) -> Vec<Event> {
        if !self.engine.is_idle() {
            return vec![Event::info("Reminders are already running.")];
        }
        if let Some(event) =
            self.engine
                .ensure_running(&self.book, self.window.as_ref(), self.cadence)
        {
            return vec![event];
        }
        let missing = if self.window.is_none() {
            "Set wake and sleep times before starting reminders."
        } else if self.cadence.is_none() {
            "Select a reminder frequency before starting reminders."
        } else {
            "Add an exercise with reps left before starting reminders."
        };
        vec![Event::warn(missing)]
    }

    pub fn stop(&mut self) -> Vec<Event> {
        self.engine.stop().into_iter().collect()
    }

    /// One second has passed.
    pub fn tick(&mut self) -> Vec<Event> {
        self.engine.tick(&self.book, self.window.as_ref())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Recompute advisory targets and arm the loop if it is idle.
    fn refresh(&mut self, events: &mut Vec<Event>) {
        self.replan(events);
        events.extend(
            self.engine
                .ensure_running(&self.book, self.window.as_ref(), self.cadence),
        );
    }

    fn replan(&self, events: &mut Vec<Event>) {
        if self.window.is_some() && self.cadence.is_some() {
            events.push(Event::PlanUpdated {
                targets: self.plan(),
                at: Utc::now(),
            });
        }
    }
}

fn rejected(err: ValidationError, message: &str) -> Vec<Event> {
    tracing::warn!(error = %err, "input rejected");
    vec![Event::warn(message)]
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StatusLevel;

    fn warned(events: &[Event]) -> bool {
        matches!(
            events,
            [Event::Status {
                level: StatusLevel::Warn,
                ..
            }]
        )
    }

    fn ready() -> Session {
        let mut session = Session::new();
        session.set_window("07:00", "23:00");
        session.set_cadence("60", None);
        session
    }

    #[test]
    fn invalid_window_is_a_noop() {
        let mut session = Session::new();
        assert!(warned(&session.set_window("7am", "23:00")));
        assert!(warned(&session.set_window("08:00", "08:00")));
        assert!(session.window().is_none());
    }

    #[test]
    fn window_reports_awake_hours() {
        let mut session = Session::new();
        let events = session.set_window("22:00", "06:00");
        match &events[0] {
            Event::WindowSet { awake_hours, .. } => assert_eq!(*awake_hours, 8.0),
            other => panic!("unexpected {other:?}"),
        }
        match &events[1] {
            Event::Status { message, .. } => assert!(message.starts_with("Awake time set: 8.0 hours.")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_exercise_input_leaves_book_unchanged() {
        let mut session = ready();
        assert!(warned(&session.add_exercise("", "10")));
        assert!(warned(&session.add_exercise("Squats", "0")));
        assert!(warned(&session.add_exercise("Squats", "ten")));
        assert!(session.exercises().is_empty());
        assert!(session.engine().is_idle());
    }

    #[test]
    fn add_arms_loop_once_ready() {
        let mut session = Session::new();
        session.add_exercise("Push-ups", "500");
        assert!(session.engine().is_idle());
        session.set_window("07:00", "23:00");
        assert!(session.engine().is_idle());
        let events = session.set_cadence("60", None);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::CycleStarted { cycle: 1, .. })));
        assert_eq!(session.state(), ReminderState::Running);

        let events = session.add_exercise("Squats", "100");
        assert!(!events.iter().any(|e| matches!(e, Event::CycleStarted { .. })));
        assert_eq!(session.engine().cycle(), 1);
    }

    #[test]
    fn plan_is_recomputed_on_changes() {
        let mut session = ready();
        let events = session.add_exercise("Push-ups", "500");
        let targets = events
            .iter()
            .find_map(|e| match e {
                Event::PlanUpdated { targets, .. } => Some(targets.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(targets[0].reps_per_interval, 31);
        assert_eq!(session.suggested_reps("Push-ups"), Some(31));
        session.set_cadence("custom", Some("120"));
        assert_eq!(session.suggested_reps("Push-ups"), Some(62));
    }

    #[test]
    fn bad_custom_interval_keeps_previous_cadence() {
        let mut session = ready();
        assert!(warned(&session.set_cadence("custom", Some("soon"))));
        assert!(warned(&session.set_cadence("custom", Some("0"))));
        assert!(warned(&session.set_cadence("fortnightly", None)));
        assert_eq!(session.cadence(), Some(Cadence::Hourly));
    }

    #[test]
    fn acknowledge_clamps_and_reports() {
        let mut session = ready();
        session.add_exercise("Dips", "10");
        let events = session.acknowledge("Dips", Some("7"));
        assert!(events.iter().any(|e| matches!(
            e,
            Event::Status { message, .. } if message == "3 reps remaining for Dips."
        )));
        let events = session.acknowledge("Dips", Some("7"));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ExerciseCompleted { .. })));
        assert_eq!(session.exercises().get("Dips").unwrap().remaining, 0);
    }

    #[test]
    fn acknowledge_rejects_non_integer() {
        let mut session = ready();
        session.add_exercise("Dips", "10");
        assert!(warned(&session.acknowledge("Dips", Some("lots"))));
        assert_eq!(session.exercises().get("Dips").unwrap().remaining, 10);
    }

    #[test]
    fn acknowledge_defaults_to_suggestion() {
        let mut session = ready();
        session.add_exercise("Push-ups", "500");
        session.acknowledge("Push-ups", None);
        assert_eq!(session.exercises().get("Push-ups").unwrap().remaining, 469);
    }

    #[test]
    fn unknown_names_are_silent() {
        let mut session = ready();
        session.add_exercise("Dips", "10");
        assert!(session.delete_exercise("Burpees").is_empty());
        assert!(session.edit_exercise("Burpees", "5").is_empty());
        assert!(session.acknowledge("Burpees", Some("5")).is_empty());
        assert_eq!(session.exercises().len(), 1);
    }

    #[test]
    fn edit_rejects_non_positive_goal() {
        let mut session = ready();
        session.add_exercise("Dips", "10");
        assert!(warned(&session.edit_exercise("Dips", "-1")));
        assert_eq!(session.exercises().get("Dips").unwrap().goal, 10);
    }

    #[test]
    fn start_explains_what_is_missing() {
        let mut session = Session::new();
        match &session.start()[..] {
            [Event::Status { message, .. }] => assert!(message.contains("wake and sleep")),
            other => panic!("unexpected {other:?}"),
        }
        session.set_window("07:00", "23:00");
        session.add_exercise("Dips", "10");
        match &session.start()[..] {
            [Event::Status { message, .. }] => assert!(message.contains("frequency")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn deleting_last_pending_exercise_closes_the_cycle() {
        let mut session = Session::new();
        session.set_window("07:00", "23:00");
        session.set_cadence("1", None);
        session.add_exercise("Dips", "10");
        for _ in 0..60 {
            session.tick();
        }
        assert_eq!(session.state(), ReminderState::AwaitingAck);
        let events = session.delete_exercise("Dips");
        assert!(events.iter().any(|e| matches!(e, Event::AllGoalsMet { .. })));
        assert!(session.engine().is_idle());
    }

    #[test]
    fn delete_after_stop_stays_stopped() {
        let mut session = ready();
        session.add_exercise("Dips", "10");
        session.add_exercise("Squats", "20");
        session.stop();
        let events = session.delete_exercise("Squats");
        assert!(!events.iter().any(|e| matches!(e, Event::CycleStarted { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::PlanUpdated { .. })));
        assert!(session.engine().is_idle());
    }

    #[test]
    fn exercise_added_mid_cycle_joins_the_next_one() {
        let mut session = Session::new();
        session.set_window("07:00", "23:00");
        session.set_cadence("1", None);
        session.add_exercise("Dips", "100");
        for _ in 0..60 {
            session.tick();
        }
        assert_eq!(session.state(), ReminderState::AwaitingAck);

        session.add_exercise("Squats", "100");
        assert_eq!(session.engine().pending(), ["Dips".to_string()]);

        session.acknowledge("Dips", Some("5"));
        assert_eq!(session.state(), ReminderState::Running);
        let fired: Vec<String> = (0..60)
            .flat_map(|_| session.tick())
            .filter_map(|e| match e {
                Event::ReminderDue { exercise, .. } => Some(exercise),
                _ => None,
            })
            .collect();
        assert_eq!(fired, ["Dips", "Squats"]);
    }

    #[test]
    fn edit_and_ack_accept_padded_names() {
        let mut session = ready();
        session.add_exercise(" Dips ", "10");
        assert!(!session.edit_exercise(" Dips ", "20").is_empty());
        session.acknowledge("Dips ", Some("5"));
        assert_eq!(session.exercises().get("Dips").unwrap().remaining, 15);
    }
}
