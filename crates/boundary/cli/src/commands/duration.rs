//! Grant duration override management

use boundary_prefs::Preferences;
use clap::Subcommand;

use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success};

/// Duration subcommands
#[derive(Subcommand)]
pub enum DurationCommands {
    /// Show the grant length
    Get,

    /// Override the grant length
    Set {
        /// Minutes of access granted per completed task
        minutes: i64,
    },

    /// Drop the override and use the default
    Clear,
}

/// Execute a duration command
pub fn execute(
    command: DurationCommands,
    prefs: &dyn Preferences,
    default_minutes: u32,
) -> CliResult<()> {
    match command {
        DurationCommands::Get => {
            match prefs.access_duration_minutes()? {
                Some(minutes) if minutes > 0 => println!("{} minutes", minutes),
                Some(minutes) => println!(
                    "{} minutes (stored value {} is unusable)",
                    default_minutes, minutes
                ),
                None => println!("{} minutes (default)", default_minutes),
            }
            Ok(())
        }
        DurationCommands::Set { minutes } => {
            if minutes <= 0 {
                return Err(CliError::InvalidInput(format!(
                    "grant duration must be a positive number of minutes, got {}",
                    minutes
                )));
            }
            prefs.set_access_duration_minutes(Some(minutes))?;
            print_success(&format!("Grants now last {} minutes", minutes));
            Ok(())
        }
        DurationCommands::Clear => {
            prefs.set_access_duration_minutes(None)?;
            print_info(&format!("Grants use the default of {} minutes", default_minutes));
            Ok(())
        }
    }
}
