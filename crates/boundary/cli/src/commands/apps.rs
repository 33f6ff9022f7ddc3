//! Bounded-app set management

use std::collections::BTreeSet;

use boundary_prefs::Preferences;
use boundary_types::AppId;
use clap::Subcommand;

use crate::error::{CliError, CliResult};
use crate::output::{print_empty, print_success};

/// Apps subcommands
#[derive(Subcommand)]
pub enum AppsCommands {
    /// List bounded apps
    List,

    /// Replace the bounded set
    Set {
        /// App identifiers; none clears the set
        apps: Vec<String>,
    },

    /// Bound additional apps
    Add {
        /// App identifiers
        #[arg(required = true)]
        apps: Vec<String>,
    },

    /// Stop bounding apps
    Remove {
        /// App identifiers
        #[arg(required = true)]
        apps: Vec<String>,
    },
}

/// Execute an apps command
pub fn execute(command: AppsCommands, prefs: &dyn Preferences) -> CliResult<()> {
    match command {
        AppsCommands::List => {
            let apps = prefs.load_bounded_apps()?;
            if apps.is_empty() {
                print_empty("No bounded apps");
            }
            for app in apps {
                println!("{}", app);
            }
            Ok(())
        }
        AppsCommands::Set { apps } => {
            let apps = parse_ids(apps)?;
            prefs.save_bounded_apps(&apps.iter().cloned().collect::<Vec<_>>())?;
            print_success(&format!("Bounded set now has {} app(s)", apps.len()));
            Ok(())
        }
        AppsCommands::Add { apps } => {
            let added = parse_ids(apps)?;
            let mut current: BTreeSet<AppId> = prefs.load_bounded_apps()?.into_iter().collect();
            current.extend(added.iter().cloned());
            prefs.save_bounded_apps(&current.into_iter().collect::<Vec<_>>())?;
            for app in added {
                print_success(&format!("Bounded {}", app));
            }
            Ok(())
        }
        AppsCommands::Remove { apps } => {
            let removed = parse_ids(apps)?;
            let current: Vec<AppId> = prefs
                .load_bounded_apps()?
                .into_iter()
                .filter(|app| !removed.contains(app))
                .collect();
            prefs.save_bounded_apps(&current)?;
            for app in removed {
                print_success(&format!("Released {}", app));
            }
            Ok(())
        }
    }
}

fn parse_ids(raw: Vec<String>) -> CliResult<BTreeSet<AppId>> {
    raw.into_iter()
        .map(|id| {
            let id = id.trim().to_string();
            if id.is_empty() {
                Err(CliError::InvalidInput("app identifier is empty".to_string()))
            } else {
                Ok(AppId::new(id))
            }
        })
        .collect()
}
