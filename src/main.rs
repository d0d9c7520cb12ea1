use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDateTime, TimeZone};
use clap::{Parser, Subcommand};
use log::info;
use tokio::{signal, sync::mpsc};

use datemath::{
    calculate, CalcMode, CalcRequest, CountdownDriver, CountdownPhase, DurationInput, FormState,
    FormStore, Sign,
};

#[derive(Parser)]
#[command(name = "datemath", about = "Date/time arithmetic with a live countdown")]
struct Cli {
    /// JSON file holding the last-entered form state
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shift a start time by a duration
    Add {
        /// Start time, local `YYYY-MM-DD HH:MM:SS`
        start: String,
        #[arg(long, default_value_t = 0)]
        days: i64,
        #[arg(long, default_value_t = 0)]
        hours: i64,
        #[arg(long, default_value_t = 0)]
        minutes: i64,
        #[arg(long, default_value_t = 0)]
        seconds: i64,
        /// Subtract the duration instead of adding it
        #[arg(long)]
        subtract: bool,
    },
    /// Signed difference between a start and a target time
    Diff {
        /// Start time, local `YYYY-MM-DD HH:MM:SS`
        start: String,
        /// Target time, local `YYYY-MM-DD HH:MM:SS`
        target: String,
    },
    /// Live 1 Hz countdown toward a target time
    Countdown {
        /// Target time, local `YYYY-MM-DD HH:MM:SS` (conflicts with --resume)
        target: Option<String>,
        /// Reuse the countdown target persisted in the state file
        #[arg(long, conflicts_with = "target")]
        resume: bool,
    },
}

fn parse_local(text: &str) -> Result<i64> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").with_context(|| {
        format!("unrecognized datetime {text:?} (expected YYYY-MM-DD HH:MM:SS)")
    })?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| anyhow!("datetime {text:?} does not exist in the local timezone"))
}

/// Pick the countdown target from an explicit value, the persisted one, or
/// neither. An explicit target together with `--resume` is rejected (clap
/// enforces this too) so the flag is never silently ignored.
fn resolve_countdown_target(
    target_ms: Option<i64>,
    resume: bool,
    persisted_ms: Option<i64>,
) -> Result<i64> {
    match (target_ms, resume) {
        (Some(_), true) => Err(anyhow!("pass either a target time or --resume, not both")),
        (Some(ms), false) => Ok(ms),
        (None, true) => {
            persisted_ms.ok_or_else(|| anyhow!("no persisted countdown target to resume"))
        }
        (None, false) => Err(anyhow!("a target time is required (or pass --resume)")),
    }
}

fn persist(store: Option<&FormStore>, form: FormState) -> Result<()> {
    if let Some(store) = store {
        store.update(form)?;
    }
    Ok(())
}

async fn run_countdown(target_ms: i64) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let driver = CountdownDriver::new(tx);
    driver.start(target_ms).await;

    // Keep printing for a few ticks after the target passes, then wind down.
    let mut passed_ticks = 0u32;
    loop {
        tokio::select! {
            update = rx.recv() => {
                let Some(update) = update else { break };
                println!("{:<16} {}", update.label, update.time_text);
                if update.phase == CountdownPhase::Passed {
                    passed_ticks += 1;
                    if passed_ticks >= 3 {
                        break;
                    }
                }
            }
            _ = signal::ctrl_c() => {
                info!("interrupted, stopping countdown");
                break;
            }
        }
    }

    driver.stop().await;
    Ok(())
}


#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.state {
        Some(path) => Some(FormStore::new(path.clone())?),
        None => None,
    };

    match cli.command {
        Command::Add {
            start,
            days,
            hours,
            minutes,
            seconds,
            subtract,
        } => {
            let request = CalcRequest {
                mode: CalcMode::Duration,
                start_ms: Some(parse_local(&start)?),
                target_ms: None,
                input: DurationInput::new(days, hours, minutes, seconds),
                sign: if subtract { Sign::Negative } else { Sign::Positive },
            };
            let result = calculate(&request)?;
            println!("{}", result.main_text);
            println!("{}", result.sub_text);
            persist(
                store.as_ref(),
                FormState {
                    mode: request.mode,
                    sign: request.sign,
                    input: request.input,
                    start_ms: request.start_ms,
                    target_ms: None,
                    countdown_target_ms: result.countdown_target_ms,
                },
            )?;
        }
        Command::Diff { start, target } => {
            let request = CalcRequest {
                mode: CalcMode::DateDiff,
                start_ms: Some(parse_local(&start)?),
                target_ms: Some(parse_local(&target)?),
                input: DurationInput::default(),
                sign: Sign::Positive,
            };
            let result = calculate(&request)?;
            println!("{}", result.main_text);
            println!("{}", result.sub_text);
            persist(
                store.as_ref(),
                FormState {
                    mode: request.mode,
                    sign: request.sign,
                    input: request.input,
                    start_ms: request.start_ms,
                    target_ms: request.target_ms,
                    countdown_target_ms: result.countdown_target_ms,
                },
            )?;
        }
        Command::Countdown { target, resume } => {
            let parsed_ms = target.as_deref().map(parse_local).transpose()?;
            let persisted_ms = store.as_ref().and_then(|s| s.form().countdown_target_ms);
            let target_ms = resolve_countdown_target(parsed_ms, resume, persisted_ms)?;
            if let Some(store) = store.as_ref() {
                let mut form = store.form();
                form.countdown_target_ms = Some(target_ms);
                store.update(form)?;
            }
            run_countdown(target_ms).await?;
        }
    }

    Ok(())
}
