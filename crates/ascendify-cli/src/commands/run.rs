use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use ascendify_core::runtime::{self, Command};
use ascendify_core::{Config, FanOut, Session, TracingNotifier};

use super::ScheduleArgs;
use crate::render::TerminalNotifier;

const HELP: &str = "\
Commands:
  wake HH:MM HH:MM        set wake and sleep times
  cadence 30|60|120|1     set reminder frequency
  cadence custom N        remind every N minutes
  add NAME GOAL           add an exercise (or reset its goal)
  edit NAME GOAL          change a goal
  delete NAME             remove an exercise
  done NAME [REPS]        log reps; REPS defaults to the suggestion
  list                    show exercises and reminder state
  plan                    show reps per interval
  start | stop            arm or cancel reminders
  quit                    end the session
Names with spaces need REPS given explicitly for 'done'.";

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
    /// Do not draw the live countdown
    #[arg(long)]
    pub no_countdown: bool,
}

/// What a typed line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Blank,
}

/// Parse one line of interactive input.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Blank);
    };
    let rest: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("help" | "?", _) => return Ok(Input::Help),
        ("quit" | "exit", []) => Command::Shutdown,
        ("list" | "status", []) => Command::Snapshot,
        ("plan", []) => Command::Plan,
        ("start", []) => Command::Start,
        ("stop", []) => Command::Stop,
        ("wake", [wake, sleep]) => Command::SetWindow {
            wake: wake.to_string(),
            sleep: sleep.to_string(),
        },
        ("cadence", [choice]) => Command::SetCadence {
            choice: choice.to_string(),
            custom: None,
        },
        ("cadence", [choice, minutes]) => Command::SetCadence {
            choice: choice.to_string(),
            custom: Some(minutes.to_string()),
        },
        ("add", [name @ .., goal]) if !name.is_empty() => Command::AddExercise {
            name: name.join(" "),
            goal: goal.to_string(),
        },
        ("edit", [name @ .., goal]) if !name.is_empty() => Command::EditExercise {
            name: name.join(" "),
            goal: goal.to_string(),
        },
        ("delete", name) if !name.is_empty() => Command::DeleteExercise {
            name: name.join(" "),
        },
        ("done", [name]) => Command::Acknowledge {
            exercise: name.to_string(),
            done: None,
        },
        ("done", [name @ .., reps]) if !name.is_empty() => Command::Acknowledge {
            exercise: name.join(" "),
            done: Some(reps.to_string()),
        },
        _ => return Err(format!("unrecognized command '{}', try 'help'", line.trim())),
    };
    Ok(Input::Command(command))
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let schedule = args.schedule.resolve(&config);
    let show_countdown = config.display.show_countdown && !args.no_countdown;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let notifier = FanOut::new()
            .with(TerminalNotifier::new(show_countdown))
            .with(TracingNotifier);
        let (handle, task) = runtime::spawn(Session::new(), notifier);

        handle.set_window(&schedule.wake, &schedule.sleep)?;
        handle.set_cadence(&schedule.cadence, schedule.custom.as_deref())?;
        println!("Type 'help' for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_line(&line) {
                Ok(Input::Command(Command::Shutdown)) => break,
                Ok(Input::Command(command)) => handle.send(command)?,
                Ok(Input::Help) => println!("{HELP}"),
                Ok(Input::Blank) => {}
                Err(message) => eprintln!("{message}"),
            }
        }

        handle.shutdown()?;
        let session = task.await?;
        tracing::debug!(
            exercises = session.exercises().len(),
            cycles = session.engine().cycle(),
            "interactive session closed"
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
