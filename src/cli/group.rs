//! Group CLI commands
//!
//! Implements CLI commands for the named sets of persons expenses are split
//! across.

use clap::Subcommand;

use crate::display::{format_group_details, format_group_list};
use crate::error::{TallyError, TallyResult};
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group; unknown members are added as persons
    Create {
        /// Group name
        name: String,
        /// Initial members
        members: Vec<String>,
    },

    /// Rename a group (expenses follow the new name)
    Rename {
        /// Current group name
        old: String,
        /// New group name
        new: String,
    },

    /// Delete a group no expense is split across
    Delete {
        /// Group name
        name: String,
    },

    /// List all groups
    List,

    /// Show a group's members
    Show {
        /// Group name
        name: String,
    },
}

/// Handle a group command
pub fn handle_group_command(storage: &mut Storage, cmd: GroupCommands) -> TallyResult<()> {
    match cmd {
        GroupCommands::Create { name, members } => {
            storage.ledger_mut().create_group(&name, &members)?;
            storage.save()?;

            let name = name.trim();
            let count = storage.ledger().group(name).map_or(0, <[String]>::len);
            println!("Created group: {}", name);
            println!("  Members: {}", count);
        }

        GroupCommands::Rename { old, new } => {
            let rewritten = storage.ledger_mut().rename_group(&old, &new)?;
            storage.save()?;

            println!("Renamed group '{}' to '{}'", old, new.trim());
            if rewritten > 0 {
                println!("  Updated {} expense(s)", rewritten);
            }
        }

        GroupCommands::Delete { name } => {
            let members = storage.ledger_mut().delete_group(&name)?;
            storage.save()?;
            println!("Deleted group: {} ({} members)", name, members.len());
        }

        GroupCommands::List => {
            println!("{}", format_group_list(storage.ledger()));
        }

        GroupCommands::Show { name } => {
            let ledger = storage.ledger();
            let members = ledger
                .group(&name)
                .ok_or_else(|| TallyError::group_not_found(&name))?;
            print!("{}", format_group_details(ledger, &name, members));
        }
    }

    Ok(())
}
