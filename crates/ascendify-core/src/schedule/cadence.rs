use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;

/// How often reminders fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    EveryThirtyMinutes,
    Hourly,
    EveryTwoHours,
    EveryMinute,
    /// Positive minute count entered by the user.
    Custom(u32),
}

impl Cadence {
    pub const PRESETS: [Cadence; 4] = [
        Cadence::EveryThirtyMinutes,
        Cadence::Hourly,
        Cadence::EveryTwoHours,
        Cadence::EveryMinute,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            Cadence::EveryThirtyMinutes => 30,
            Cadence::Hourly => 60,
            Cadence::EveryTwoHours => 120,
            Cadence::EveryMinute => 1,
            Cadence::Custom(m) => *m,
        }
    }

    pub fn seconds(&self) -> u64 {
        u64::from(self.minutes()).saturating_mul(60)
    }

    pub fn custom(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::NonPositive {
                field: "custom interval",
            });
        }
        Ok(Cadence::Custom(minutes))
    }

    /// Resolve a frequency choice.
    ///
    /// `choice` is a preset (`30`, `60`, `120`, `1` or its named alias) or
    /// `custom`, in which case `custom_minutes` is read as the interval.
    pub fn parse(choice: &str, custom_minutes: Option<&str>) -> Result<Self, ValidationError> {
        let choice = choice.trim().to_ascii_lowercase();
        match choice.as_str() {
            "30" | "every-30-minutes" => Ok(Cadence::EveryThirtyMinutes),
            "60" | "hourly" | "every-hour" => Ok(Cadence::Hourly),
            "120" | "every-2-hours" => Ok(Cadence::EveryTwoHours),
            "1" | "every-minute" => Ok(Cadence::EveryMinute),
            "custom" => {
                let text = custom_minutes.unwrap_or("").trim();
                let minutes: i64 = text.parse().map_err(|_| ValidationError::NotANumber {
                    field: "custom interval",
                    input: text.to_string(),
                })?;
                if minutes <= 0 {
                    return Err(ValidationError::NonPositive {
                        field: "custom interval",
                    });
                }
                let minutes = u32::try_from(minutes).map_err(|_| ValidationError::NotANumber {
                    field: "custom interval",
                    input: text.to_string(),
                })?;
                Self::custom(minutes)
            }
            _ => Err(ValidationError::UnknownCadence(choice)),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::EveryThirtyMinutes => write!(f, "Every 30 minutes"),
            Cadence::Hourly => write!(f, "Every hour"),
            Cadence::EveryTwoHours => write!(f, "Every 2 hours"),
            Cadence::EveryMinute => write!(f, "Every minute"),
            Cadence::Custom(1) => write!(f, "Every minute"),
            Cadence::Custom(m) => write!(f, "Every {m} minutes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_minutes() {
        let minutes: Vec<u32> = Cadence::PRESETS.iter().map(Cadence::minutes).collect();
        assert_eq!(minutes, vec![30, 60, 120, 1]);
    }

    #[test]
    fn parse_accepts_numbers_and_aliases() {
        assert_eq!(Cadence::parse("60", None), Ok(Cadence::Hourly));
        assert_eq!(Cadence::parse("Hourly", None), Ok(Cadence::Hourly));
        assert_eq!(Cadence::parse("every-2-hours", None), Ok(Cadence::EveryTwoHours));
        assert_eq!(Cadence::parse("1", None), Ok(Cadence::EveryMinute));
    }

    #[test]
    fn custom_reads_separate_field() {
        assert_eq!(Cadence::parse("custom", Some("45")), Ok(Cadence::Custom(45)));
        assert_eq!(Cadence::parse("custom", Some("45")).unwrap().seconds(), 2700);
    }

    #[test]
    fn custom_rejects_bad_minutes() {
        assert!(matches!(
            Cadence::parse("custom", Some("abc")),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            Cadence::parse("custom", None),
            Err(ValidationError::NotANumber { .. })
        ));
        assert_eq!(
            Cadence::parse("custom", Some("0")),
            Err(ValidationError::NonPositive { field: "custom interval" })
        );
        assert_eq!(
            Cadence::parse("custom", Some("-5")),
            Err(ValidationError::NonPositive { field: "custom interval" })
        );
    }

    #[test]
    fn unknown_choice() {
        assert_eq!(
            Cadence::parse("weekly", None),
            Err(ValidationError::UnknownCadence("weekly".into()))
        );
    }

    #[test]
    fn display_labels() {
        assert_eq!(Cadence::Hourly.to_string(), "Every hour");
        assert_eq!(Cadence::Custom(45).to_string(), "Every 45 minutes");
    }
}
