use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use tally_cli::cli::{
    handle_balance_command, handle_expense_command, handle_export_command, handle_group_command,
    handle_import_command, handle_person_command, handle_prepayment_command,
    handle_report_command, handle_settle_command, ExpenseCommands, ExportArgs, GroupCommands,
    ImportArgs, PersonCommands, PrepaymentCommands,
};
use tally_cli::config::{Settings, TallyPaths};
use tally_cli::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based shared expense ledger",
    long_about = "Tally keeps track of who paid for what on a trip or in a shared \
                  household, splits each expense evenly across a group, and tells \
                  you who has to pay whom to settle up."
)]
struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(long, global = true, env = "TALLY_FILE")]
    file: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ledger file
    Init {
        /// Fill the ledger with a sample weekend trip
        #[arg(long)]
        sample: bool,
        /// Overwrite an existing ledger
        #[arg(long)]
        force: bool,
    },

    /// Person management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Group management commands
    #[command(subcommand)]
    Group(GroupCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Prepayment management commands
    #[command(subcommand)]
    Prepayment(PrepaymentCommands),

    /// Show what everyone paid, received and owes
    Balance,

    /// Show the payments that settle all balances
    Settle,

    /// Print the full cost split summary
    Report {
        /// Save the report to a text file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the ledger and its settlement
    Export(ExportArgs),

    /// Replace the ledger with a JSON or YAML export
    Import(ImportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tally_cli::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ledger_path = cli
        .file
        .unwrap_or_else(|| paths.resolve(&settings.ledger_file));
    debug!(ledger = %ledger_path.display(), "resolved ledger file");

    let Some(command) = cli.command else {
        println!("Tally - shared expense ledger");
        println!();
        println!("Run 'tally --help' for usage information.");
        println!("Run 'tally init --sample' to start with an example trip.");
        return Ok(());
    };

    match command {
        Commands::Init { sample, force } => {
            println!("Initializing ledger at: {}", ledger_path.display());
            let ledger = initialize_storage(&ledger_path, sample, force)?;
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("Initialization complete!");
            if sample {
                println!();
                println!(
                    "Sample trip created: {} persons, {} groups, {} expenses, {} prepayments.",
                    ledger.persons().len(),
                    ledger.groups().len(),
                    ledger.expenses().len(),
                    ledger.prepayments().len()
                );
                println!("Run 'tally report' to see how it settles.");
            }
        }
        Commands::Config => {
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", ledger_path.display());
            println!();
            println!("Settings:");
            println!("  Display precision: {}", settings.display_precision);
            println!(
                "  Default group:     {}",
                settings.default_group.as_deref().unwrap_or("(none)")
            );
        }
        Commands::Person(cmd) => {
            handle_person_command(&mut Storage::open(ledger_path)?, &settings, cmd)?;
        }
        Commands::Group(cmd) => {
            handle_group_command(&mut Storage::open(ledger_path)?, cmd)?;
        }
        Commands::Expense(cmd) => {
            handle_expense_command(&mut Storage::open(ledger_path)?, &settings, cmd)?;
        }
        Commands::Prepayment(cmd) => {
            handle_prepayment_command(&mut Storage::open(ledger_path)?, &settings, cmd)?;
        }
        Commands::Balance => {
            handle_balance_command(&Storage::open(ledger_path)?, &settings)?;
        }
        Commands::Settle => {
            handle_settle_command(&Storage::open(ledger_path)?, &settings)?;
        }
        Commands::Report { output } => {
            handle_report_command(&Storage::open(ledger_path)?, &settings, output)?;
        }
        Commands::Export(args) => {
            handle_export_command(&Storage::open(ledger_path)?, args)?;
        }
        Commands::Import(args) => {
            handle_import_command(&mut Storage::open(ledger_path)?, args)?;
        }
    }

    Ok(())
}
