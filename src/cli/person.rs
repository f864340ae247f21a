//! Person CLI commands
//!
//! Implements CLI commands for managing the people who share costs.

use clap::Subcommand;
use tracing::warn;

use crate::config::Settings;
use crate::display::format_person_list;
use crate::error::TallyResult;
use crate::storage::Storage;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a person, optionally to a group
    Add {
        /// Person name
        name: String,
        /// Group to join (defaults to the configured default group)
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Remove a person who is in no group and named by no record
    Remove {
        /// Person name
        name: String,
    },

    /// Take a person out of a group
    Leave {
        /// Person name
        name: String,
        /// Group name
        group: String,
    },

    /// List all persons and their groups
    List,
}

/// Handle a person command
pub fn handle_person_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: PersonCommands,
) -> TallyResult<()> {
    match cmd {
        PersonCommands::Add { name, group } => {
            let group = group.or_else(|| default_group(storage, settings));
            let ledger = storage.ledger_mut();
            let added = ledger.add_person(&name, group.as_deref())?;
            storage.save()?;

            let name = name.trim();
            match (added, group) {
                (true, Some(group)) => println!("Added person: {} (group '{}')", name, group),
                (true, None) => println!("Added person: {}", name),
                (false, Some(group)) => println!("{} is now in group '{}'", name, group),
                (false, None) => println!("{} is already known.", name),
            }
        }

        PersonCommands::Remove { name } => {
            storage.ledger_mut().remove_person(&name)?;
            storage.save()?;
            println!("Removed person: {}", name);
        }

        PersonCommands::Leave { name, group } => {
            let removed = storage.ledger_mut().remove_person_from_group(&name, &group)?;
            storage.save()?;

            println!("{} left group '{}'", name, group);
            if removed {
                println!("{} is in no group anymore and was removed.", name);
            }
        }

        PersonCommands::List => {
            println!("{}", format_person_list(storage.ledger()));
        }
    }

    Ok(())
}

/// The configured default group, if the ledger still has it
fn default_group(storage: &Storage, settings: &Settings) -> Option<String> {
    let group = settings.default_group.as_ref()?;
    if storage.ledger().group(group).is_some() {
        Some(group.clone())
    } else {
        warn!(group = %group, "configured default group does not exist, ignoring");
        None
    }
}
