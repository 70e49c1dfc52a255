//! Command-line front end for the child record store.
//!
//! # Responsibility
//! - Translate arguments into `ChildCommand` intents.
//! - Own every user-facing message; core only returns structured outcomes.
//!
//! Exit codes: `0` success, `1` error, `2` target id not found.

mod render;

use childrec_core::{AgeInput, ChildCommand, ChildId, ChildOutcome, ChildStore, CoreConfig};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_ERROR: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "childrec", version = childrec_core::core_version())]
#[command(about = "Manage child records with soft delete", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file (overrides CHILDREC_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new child record
    Add {
        name: String,
        surname: String,
        mail_address: String,
        /// Whole number; text is accepted and coerced
        age: String,
    },

    /// Update fields of an existing record
    Update {
        id: ChildId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        mail_address: Option<String>,
        #[arg(long)]
        age: Option<String>,
    },

    /// Flip a record between active and inactive
    #[command(alias = "delete")]
    Toggle { id: ChildId },

    /// Show one record
    Get { id: ChildId },

    /// List all records, active and inactive
    #[command(alias = "ls")]
    List,
}

impl Commands {
    fn target_id(&self) -> Option<ChildId> {
        match self {
            Self::Update { id, .. } | Self::Toggle { id } | Self::Get { id } => Some(*id),
            Self::Add { .. } | Self::List => None,
        }
    }

    fn into_command(self) -> ChildCommand {
        match self {
            Self::Add {
                name,
                surname,
                mail_address,
                age,
            } => ChildCommand::Add {
                name,
                surname,
                mail_address,
                age: AgeInput::Text(age),
            },
            Self::Update {
                id,
                name,
                surname,
                mail_address,
                age,
            } => {
                let changes = [
                    ("name", name),
                    ("surname", surname),
                    ("mail_address", mail_address),
                    ("age", age),
                ]
                .into_iter()
                .filter_map(|(field, value)| value.map(|value| (field.to_string(), value)))
                .collect();
                ChildCommand::Update { id, changes }
            }
            Self::Toggle { id } => ChildCommand::Toggle { id },
            Self::Get { id } => ChildCommand::Get { id },
            Self::List => ChildCommand::List,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }
    if let Err(err) = config.init_logging() {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut store = match ChildStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!(
                "error: cannot open database `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let target_id = cli.command.target_id();
    let command = cli.command.into_command();
    info!("event=cli_dispatch module=cli status=start intent={}", command.intent());

    match store.dispatch(command) {
        Ok(ChildOutcome::Absent) => {
            eprintln!(
                "warning: no child with id {}",
                target_id.map_or_else(|| "?".to_string(), |id| id.to_string())
            );
            ExitCode::from(EXIT_NOT_FOUND)
        }
        Ok(outcome) => match render::print_outcome(&outcome, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::from(EXIT_ERROR)
            }
        },
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
