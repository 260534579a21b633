pub mod config;
pub mod plan;
pub mod run;

use ascendify_core::Config;
use clap::Args;

/// Window and cadence flags shared by `plan` and `run`.
///
/// Anything left unset falls back to the preferences file.
#[derive(Args, Debug, Clone, Default)]
pub struct ScheduleArgs {
    /// Wake-up time (HH:MM)
    #[arg(long)]
    pub wake: Option<String>,
    /// Sleep time (HH:MM); earlier than wake means after midnight
    #[arg(long)]
    pub sleep: Option<String>,
    /// Reminder frequency: 30, 60, 120, 1 or custom
    #[arg(long)]
    pub cadence: Option<String>,
    /// Minutes between reminders when the frequency is custom
    #[arg(long)]
    pub custom: Option<String>,
}

pub struct ResolvedSchedule {
    pub wake: String,
    pub sleep: String,
    pub cadence: String,
    pub custom: Option<String>,
}

impl ScheduleArgs {
    pub fn resolve(&self, config: &Config) -> ResolvedSchedule {
        ResolvedSchedule {
            wake: self.wake.clone().unwrap_or_else(|| config.schedule.wake.clone()),
            sleep: self.sleep.clone().unwrap_or_else(|| config.schedule.sleep.clone()),
            cadence: self
                .cadence
                .clone()
                .unwrap_or_else(|| config.reminders.cadence.clone()),
            custom: self
                .custom
                .clone()
                .or_else(|| Some(config.reminders.custom_minutes.to_string())),
        }
    }
}
