use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::error::ValidationError;

/// Parse strict 24-hour `HH:MM` text.
///
/// Both fields must be two digits; surrounding whitespace is ignored.
pub fn parse_clock(input: &str) -> Result<NaiveTime, ValidationError> {
    let text = input.trim();
    let invalid = || ValidationError::InvalidTime {
        input: input.to_string(),
    };

    let (hh, mm) = text.split_once(':').ok_or_else(invalid)?;
    if hh.len() != 2 || mm.len() != 2 {
        return Err(invalid());
    }
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| invalid())
}

/// Wake/sleep window for one day.
///
/// A sleep time earlier than the wake time is taken to fall on the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AwakeWindow {
    wake: NaiveTime,
    sleep: NaiveTime,
}

impl AwakeWindow {
    pub fn new(wake: NaiveTime, sleep: NaiveTime) -> Result<Self, ValidationError> {
        if wake == sleep {
            return Err(ValidationError::EmptyWindow);
        }
        Ok(Self { wake, sleep })
    }

    /// Build a window from two `HH:MM` strings.
    pub fn parse(wake: &str, sleep: &str) -> Result<Self, ValidationError> {
        Self::new(parse_clock(wake)?, parse_clock(sleep)?)
    }

    pub fn wake(&self) -> NaiveTime {
        self.wake
    }

    pub fn sleep(&self) -> NaiveTime {
        self.sleep
    }

    pub fn awake_duration(&self) -> Duration {
        let span = self.sleep - self.wake;
        if span < Duration::zero() {
            span + Duration::days(1)
        } else {
            span
        }
    }

    pub fn awake_minutes(&self) -> i64 {
        self.awake_duration().num_minutes()
    }

    /// Always strictly positive.
    pub fn awake_hours(&self) -> f64 {
        self.awake_minutes() as f64 / 60.0
    }
}
