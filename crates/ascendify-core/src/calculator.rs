//! Per-interval rep targets.
//!
//! A daily goal `G` spread over an awake window of `A` hours with a reminder
//! every `I` minutes gives `floor(G / (A * 60 / I))` reps per reminder. The
//! result is advisory; nothing here touches remaining-rep state.

use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseBook;
use crate::schedule::{AwakeWindow, Cadence};

/// Number of reminder intervals that fit in the awake window.
///
/// `None` when either input is zero or not finite.
pub fn intervals_per_day(awake_hours: f64, interval_minutes: u32) -> Option<f64> {
    if !awake_hours.is_finite() || awake_hours <= 0.0 || interval_minutes == 0 {
        return None;
    }
    Some(awake_hours * 60.0 / f64::from(interval_minutes))
}

/// Reps to do at each reminder for a daily `goal`.
pub fn reps_per_interval(goal: u32, awake_hours: f64, interval_minutes: u32) -> Option<u32> {
    let intervals = intervals_per_day(awake_hours, interval_minutes)?;
    // Float division then truncation, so 500 / (16 * 60 / 60) == 31.
    let reps = (f64::from(goal) / intervals).floor();
    if reps > f64::from(u32::MAX) {
        return None;
    }
    Some(reps as u32)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTarget {
    pub exercise: String,
    pub goal: u32,
    pub reps_per_interval: u32,
}

/// Advisory targets for every exercise, in insertion order.
///
/// Empty until both the window and the cadence are known.
pub fn plan(
    book: &ExerciseBook,
    window: Option<&AwakeWindow>,
    cadence: Option<Cadence>,
) -> Vec<IntervalTarget> {
    let (Some(window), Some(cadence)) = (window, cadence) else {
        return Vec::new();
    };
    let hours = window.awake_hours();
    book.iter()
        .filter_map(|e| {
            reps_per_interval(e.goal, hours, cadence.minutes()).map(|reps| IntervalTarget {
                exercise: e.name.clone(),
                goal: e.goal,
                reps_per_interval: reps,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_example() {
        assert_eq!(reps_per_interval(500, 16.0, 60), Some(31));
    }

    #[test]
    fn shorter_cadence_means_fewer_reps() {
        assert_eq!(reps_per_interval(500, 16.0, 30), Some(15));
        assert_eq!(reps_per_interval(500, 16.0, 120), Some(62));
        assert_eq!(reps_per_interval(500, 16.0, 1), Some(0));
    }

    #[test]
    fn missing_inputs_produce_nothing() {
        assert_eq!(reps_per_interval(100, 0.0, 60), None);
        assert_eq!(reps_per_interval(100, 8.0, 0), None);
        assert_eq!(reps_per_interval(100, f64::NAN, 60), None);
    }

    #[test]
    fn interval_longer_than_window() {
        // One 120-minute interval in a one-hour window: half an interval.
        assert_eq!(intervals_per_day(1.0, 120), Some(0.5));
        assert_eq!(reps_per_interval(10, 1.0, 120), Some(20));
    }

    #[test]
    fn oversized_result_is_rejected() {
        assert_eq!(reps_per_interval(100, 1.0, 600), Some(1000));
        assert_eq!(reps_per_interval(u32::MAX, 1.0, 600), None);
    }

    #[test]
    fn plan_needs_window_and_cadence() {
        let mut book = ExerciseBook::new();
        book.add("Push-ups", 500).unwrap();
        book.add("Squats", 160).unwrap();
        let window = AwakeWindow::parse("07:00", "23:00").unwrap();

        assert!(plan(&book, None, Some(Cadence::Hourly)).is_empty());
        assert!(plan(&book, Some(&window), None).is_empty());

        let targets = plan(&book, Some(&window), Some(Cadence::Hourly));
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].exercise, "Push-ups");
        assert_eq!(targets[0].reps_per_interval, 31);
        assert_eq!(targets[1].reps_per_interval, 10);
    }

    proptest! {
        #[test]
        fn matches_floor_formula(goal in 1u32..100_000, hours in 1u32..24, interval in 1u32..240) {
            let expected = (goal as f64 / (hours as f64 * 60.0 / interval as f64)).floor() as u32;
            prop_assert_eq!(reps_per_interval(goal, hours as f64, interval), Some(expected));
        }

        #[test]
        fn never_exceeds_goal_when_interval_fits(goal in 1u32..100_000, hours in 1u32..24, interval in 1u32..60) {
            let reps = reps_per_interval(goal, hours as f64, interval).unwrap();
            prop_assert!(reps <= goal);
        }
    }
}
