//! Boundary CLI - command-line host for the bounded-app monitor
//!
//! This CLI lets operators and developers:
//! - Run the monitor against a JSON-lines event stream on stdin
//! - Replay scripted timelines deterministically
//! - Manage the bounded-app set and the grant duration

use std::path::PathBuf;
use std::sync::Arc;

use boundary_monitor::MonitorConfig;
use boundary_prefs::{FilePreferences, Preferences};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{apps, duration, replay, run};
use error::CliResult;

/// Boundary CLI application
#[derive(Parser)]
#[command(name = "boundary")]
#[command(about = "Boundary - bounded-app access control", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "BOUNDARY_CONFIG", global = true)]
    config: Option<String>,

    /// Preferences file, overriding the configured path
    #[arg(long, env = "BOUNDARY_PREFS_FILE", global = true)]
    prefs: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Run the monitor, reading JSON-line inputs from stdin
    Run,

    /// Replay a scripted timeline against a manual clock
    Replay(replay::ReplayArgs),

    /// Manage bounded apps
    Apps {
        #[command(subcommand)]
        command: apps::AppsCommands,
    },

    /// Manage the grant duration
    Duration {
        #[command(subcommand)]
        command: duration::DurationCommands,
    },
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let mut config = MonitorConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.prefs.clone() {
        config.prefs.path = path;
    }

    init_tracing(&config, cli.verbose);

    let prefs: Arc<dyn Preferences> = Arc::new(FilePreferences::new(config.prefs.path.clone()));

    match cli.command {
        Commands::Run => run::execute(&config, prefs).await,
        Commands::Replay(args) => replay::execute(args, config),
        Commands::Apps { command } => apps::execute(command, prefs.as_ref()),
        Commands::Duration { command } => duration::execute(
            command,
            prefs.as_ref(),
            config.engine.default_grant_minutes,
        ),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &MonitorConfig, verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
