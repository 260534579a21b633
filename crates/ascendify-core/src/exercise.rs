//! Exercises and their daily rep accounting.
//!
//! [`ExerciseBook`] is the only owner of exercise state. Names are unique keys
//! and iteration follows insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Daily rep goal. Always > 0.
    pub goal: u32,
    /// Reps still owed today. Never exceeds `goal`.
    pub remaining: u32,
}

impl Exercise {
    fn new(name: String, goal: u32) -> Self {
        Self {
            name,
            goal,
            remaining: goal,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Outcome of logging reps against an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepLog {
    pub logged: u32,
    pub remaining: u32,
    /// True only on the log that brought `remaining` to zero.
    pub just_completed: bool,
}

/// Parse a rep count from user text.
///
/// Rejects anything that is not a whole number, and numbers that are not
/// strictly positive.
pub fn parse_goal(field: &'static str, input: &str) -> Result<u32, ValidationError> {
    let value = parse_whole(field, input)?;
    if value <= 0 {
        return Err(ValidationError::NonPositive { field });
    }
    u32::try_from(value).map_err(|_| ValidationError::NotANumber {
        field,
        input: input.trim().to_string(),
    })
}

/// Parse a completed-reps count. Zero is allowed (nothing done this round).
pub fn parse_done(input: &str) -> Result<u32, ValidationError> {
    let field = "reps done";
    let value = parse_whole(field, input)?;
    if value < 0 {
        return Err(ValidationError::NonPositive { field });
    }
    u32::try_from(value).map_err(|_| ValidationError::NotANumber {
        field,
        input: input.trim().to_string(),
    })
}

fn parse_whole(field: &'static str, input: &str) -> Result<i64, ValidationError> {
    let text = input.trim();
    text.parse::<i64>().map_err(|_| ValidationError::NotANumber {
        field,
        input: text.to_string(),
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseBook {
    entries: IndexMap<String, Exercise>,
}

impl ExerciseBook {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn get(&self, name: &str) -> Option<&Exercise> {
        self.entries.get(name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.entries.values()
    }

    /// Exercises that still owe reps, in insertion order.
    pub fn outstanding(&self) -> impl Iterator<Item = &Exercise> {
        self.entries.values().filter(|e| !e.is_complete())
    }

    pub fn has_outstanding(&self) -> bool {
        self.outstanding().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add an exercise, or replace the goal of an existing one.
    ///
    /// Remaining reps are reset to the goal either way.
    pub fn add(&mut self, name: &str, goal: u32) -> Result<&Exercise, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if goal == 0 {
            return Err(ValidationError::NonPositive { field: "rep goal" });
        }
        let entry = self
            .entries
            .entry(name.to_string())
            .and_modify(|e| {
                e.goal = goal;
                e.remaining = goal;
            })
            .or_insert_with(|| Exercise::new(name.to_string(), goal));
        Ok(&*entry)
    }

    /// Change the goal of a known exercise and reset its remaining reps.
    ///
    /// Returns `Ok(None)` when no exercise has that name.
    pub fn edit(&mut self, name: &str, goal: u32) -> Result<Option<&Exercise>, ValidationError> {
        if goal == 0 {
            return Err(ValidationError::NonPositive { field: "rep goal" });
        }
        Ok(self.entries.get_mut(name.trim()).map(|e| {
            e.goal = goal;
            e.remaining = goal;
            &*e
        }))
    }

    /// Remove an exercise. Unknown names are ignored.
    ///
    /// Lookups trim the name the same way [`ExerciseBook::add`] does.
    pub fn delete(&mut self, name: &str) -> Option<Exercise> {
        self.entries.shift_remove(name.trim())
    }

    /// Subtract completed reps, clamping at zero.
    pub fn log_reps(&mut self, name: &str, done: u32) -> Option<RepLog> {
        let exercise = self.entries.get_mut(name.trim())?;
        let was_complete = exercise.is_complete();
        exercise.remaining = exercise.remaining.saturating_sub(done);
        Some(RepLog {
            logged: done,
            remaining: exercise.remaining,
            just_completed: !was_complete && exercise.is_complete(),
        })
    }
}
