//! Deterministic timeline replay against a manual clock

use std::path::{Path, PathBuf};
use std::sync::Arc;

use boundary_engine::ManualClock;
use boundary_monitor::{MonitorConfig, MonitorInput, MonitorOutput, MonitorService};
use boundary_prefs::{InMemoryPreferences, Preferences};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};
use crate::output::print_json_line;

/// Replay arguments
#[derive(Args)]
pub struct ReplayArgs {
    /// Timeline file, one JSON step per line
    pub file: PathBuf,

    /// Cooldown window in milliseconds
    #[arg(long)]
    pub cooldown_ms: Option<u64>,

    /// Stored grant duration override in minutes
    #[arg(long)]
    pub grant_minutes: Option<i64>,

    /// Host application identifier
    #[arg(long)]
    pub host: Option<String>,
}

/// One scripted input, `at_ms` after the start of the timeline.
#[derive(Debug, Deserialize)]
struct ReplayStep {
    at_ms: u64,
    #[serde(flatten)]
    input: MonitorInput,
}

#[derive(Serialize)]
struct ReplayLine<'a> {
    at_ms: u64,
    #[serde(flatten)]
    output: &'a MonitorOutput,
}

/// Execute a replay
pub fn execute(args: ReplayArgs, mut config: MonitorConfig) -> CliResult<()> {
    if let Some(cooldown_ms) = args.cooldown_ms {
        config.engine.cooldown_window_ms = cooldown_ms;
    }
    if let Some(host) = args.host {
        config.engine.host_app_id = host;
    }

    let steps = load_steps(&args.file)?;

    let prefs = Arc::new(InMemoryPreferences::new());
    prefs.set_access_duration_minutes(args.grant_minutes)?;

    let clock = Arc::new(ManualClock::at_epoch());
    let start = DateTime::<Utc>::UNIX_EPOCH;
    let (service, mut presenter_rx) = MonitorService::from_config(&config, prefs, clock.clone());
    service.start();

    for step in &steps {
        clock.set(offset(start, step.at_ms)?);
        let output = service.apply(step.input.clone());
        print_json_line(&ReplayLine {
            at_ms: step.at_ms,
            output: &output,
        })?;

        while let Ok(message) = presenter_rx.try_recv() {
            debug!(at_ms = step.at_ms, ?message, "Presenter message");
        }
    }

    info!(steps = steps.len(), "Replay finished");
    Ok(())
}

fn load_steps(path: &Path) -> CliResult<Vec<ReplayStep>> {
    let contents = std::fs::read_to_string(path)?;
    let mut steps: Vec<ReplayStep> = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step: ReplayStep = serde_json::from_str(line).map_err(|e| {
            CliError::InvalidInput(format!("{}:{}: {}", path.display(), index + 1, e))
        })?;
        if let Some(previous) = steps.last() {
            if step.at_ms < previous.at_ms {
                return Err(CliError::InvalidInput(format!(
                    "{}:{}: at_ms {} is earlier than the previous step ({})",
                    path.display(),
                    index + 1,
                    step.at_ms,
                    previous.at_ms
                )));
            }
        }
        steps.push(step);
    }

    Ok(steps)
}

fn offset(start: DateTime<Utc>, at_ms: u64) -> CliResult<DateTime<Utc>> {
    i64::try_from(at_ms)
        .ok()
        .and_then(Duration::try_milliseconds)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| CliError::InvalidInput(format!("at_ms {} is out of range", at_ms)))
}
