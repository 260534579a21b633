//! Text rendering of session events for the terminal.

use std::io::{IsTerminal, Write};

use ascendify_core::{Event, Notifier, ReminderState, StatusLevel};

/// Format an event as output lines. `None` for events that carry nothing the
/// user has not already been told by a status line.
pub fn render(event: &Event) -> Option<String> {
    match event {
        Event::Status {
            level: StatusLevel::Info,
            message,
            ..
        } => Some(message.clone()),
        Event::Status {
            level: StatusLevel::Warn,
            message,
            ..
        } => Some(format!("! {message}")),
        Event::PlanUpdated { targets, .. } if !targets.is_empty() => Some(
            targets
                .iter()
                .map(|t| format!("  {}: {} reps per interval", t.exercise, t.reps_per_interval))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Event::CycleStarted { interval_secs, .. } => {
            Some(format!("Next reminder in {}.", clock(*interval_secs)))
        }
        Event::ReminderDue {
            exercise,
            reps_to_do,
            ..
        } => Some(format!(
            "Time to do {reps_to_do} {exercise}! Mark how many you've completed with: done {exercise} [reps]"
        )),
        Event::AllGoalsMet { .. } => Some("All goals met for today.".to_string()),
        Event::LoopStopped { .. } => Some("Reminders stopped.".to_string()),
        Event::StateSnapshot {
            state,
            remaining_secs,
            exercises,
            pending,
            ..
        } => {
            let mut lines: Vec<String> = exercises
                .iter()
                .map(|e| format!("  {}: {} reps (Left: {})", e.name, e.goal, e.remaining))
                .collect();
            if lines.is_empty() {
                lines.push("  No exercises yet.".to_string());
            }
            lines.push(match state {
                ReminderState::Idle => "Reminders idle.".to_string(),
                ReminderState::Running => {
                    format!("Next reminder in {}.", clock(*remaining_secs))
                }
                ReminderState::AwaitingAck => {
                    format!("Waiting for: {}.", pending.join(", "))
                }
            });
            Some(lines.join("\n"))
        }
        _ => None,
    }
}

/// `MM:SS`, with hours folded into minutes.
pub fn clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Prints rendered events to stdout.
///
/// The countdown is redrawn in place, and only when stdout is a terminal.
pub struct TerminalNotifier {
    show_countdown: bool,
}

impl TerminalNotifier {
    pub fn new(show_countdown: bool) -> Self {
        Self {
            show_countdown: show_countdown && std::io::stdout().is_terminal(),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, event: &Event) {
        let mut out = std::io::stdout().lock();
        if let Event::Countdown { remaining_secs, .. } = event {
            if self.show_countdown {
                let _ = write!(out, "\r  {} ", clock(*remaining_secs));
                let _ = out.flush();
            }
            return;
        }
        if let Some(text) = render(event) {
            if self.show_countdown {
                let _ = write!(out, "\r");
            }
            let _ = writeln!(out, "{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascendify_core::Session;

    #[test]
    fn clock_format() {
        assert_eq!(clock(3600), "60:00");
        assert_eq!(clock(59), "00:59");
        assert_eq!(clock(7261), "121:01");
    }

    #[test]
    fn warnings_are_marked() {
        let event = Event::warn("Please enter a number for the rep goal.");
        assert_eq!(
            render(&event).as_deref(),
            Some("! Please enter a number for the rep goal.")
        );
    }

    #[test]
    fn reminder_text() {
        let event = Event::ReminderDue {
            exercise: "Push-ups".into(),
            reps_to_do: 31,
            remaining: 500,
            at: chrono::Utc::now(),
        };
        let text = render(&event).unwrap();
        assert!(text.starts_with("Time to do 31 Push-ups!"));
    }

    #[test]
    fn snapshot_lists_exercises() {
        let mut session = Session::new();
        session.add_exercise("Push-ups", "500");
        session.acknowledge("Push-ups", Some("7"));
        let text = render(&session.snapshot()).unwrap();
        assert!(text.contains("Push-ups: 500 reps (Left: 493)"));
        assert!(text.ends_with("Reminders idle."));
    }

    #[test]
    fn bookkeeping_events_are_silent() {
        let mut session = Session::new();
        let events = session.set_window("07:00", "23:00");
        assert!(render(&events[0]).is_none());
        assert!(matches!(
            events[1],
            Event::Status {
                level: StatusLevel::Info,
                ..
            }
        ));
    }
}
