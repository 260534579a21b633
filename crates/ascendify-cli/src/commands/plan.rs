use clap::Args;

use ascendify_core::{Config, Event, Session, StatusLevel};

use super::ScheduleArgs;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
    /// Exercise and daily goal as NAME=GOAL (repeatable)
    #[arg(long = "exercise", short = 'e', value_name = "NAME=GOAL")]
    pub exercises: Vec<String>,
    /// Print targets as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let schedule = args.schedule.resolve(&config);

    let mut session = Session::new();
    let mut events = session.set_window(&schedule.wake, &schedule.sleep);
    events.extend(session.set_cadence(&schedule.cadence, schedule.custom.as_deref()));
    for spec in &args.exercises {
        let (name, goal) = spec
            .rsplit_once('=')
            .ok_or_else(|| format!("expected NAME=GOAL, got '{spec}'"))?;
        events.extend(session.add_exercise(name, goal));
    }

    if let Some(message) = events.iter().find_map(|e| match e {
        Event::Status {
            level: StatusLevel::Warn,
            message,
            ..
        } => Some(message.clone()),
        _ => None,
    }) {
        return Err(message.into());
    }

    let targets = session.plan();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    if let (Some(window), Some(cadence)) = (session.window(), session.cadence()) {
        println!(
            "Awake time: {:.1} hours, {} ({} reminders)",
            window.awake_hours(),
            cadence,
            window.awake_minutes() / i64::from(cadence.minutes())
        );
    }
    if targets.is_empty() {
        println!("No exercises given. Use --exercise NAME=GOAL.");
    }
    for target in &targets {
        println!(
            "{}: {} reps per interval ({} daily)",
            target.exercise, target.reps_per_interval, target.goal
        );
    }
    Ok(())
}
