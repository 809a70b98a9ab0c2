//! Tuning file management commands.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Subcommand};
use claritizer_config::{TuningTable, default_tuning_path, validate_tuning};

#[derive(Args)]
pub struct TuningArgs {
    #[command(subcommand)]
    action: TuningAction,
}

#[derive(Subcommand)]
enum TuningAction {
    /// Write the factory tables to a TOML file for editing
    Export {
        /// Destination (default: the user tuning file)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Description stored in the file
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Validate a tuning file and report values the engine will clamp
    Check {
        /// Tuning file to check (default: the user tuning file)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Print the default tuning file location
    Path,
}

pub fn run(args: TuningArgs) -> anyhow::Result<()> {
    match args.action {
        TuningAction::Export {
            path,
            force,
            description,
        } => {
            let path = path.unwrap_or_else(default_tuning_path);
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            let mut table = TuningTable::factory();
            if let Some(description) = description {
                table = table.with_description(description);
            }
            table.save(&path)?;
            println!("Wrote factory tuning to {}", path.display());
        }

        TuningAction::Check { path } => {
            let path = path.unwrap_or_else(default_tuning_path);
            let table = TuningTable::load(&path)?;
            let warnings = validate_tuning(&table)?;

            if let Some(description) = &table.description {
                println!("{}: {}", path.display(), description);
            }
            if warnings.is_empty() {
                println!("{}: OK", path.display());
            } else {
                for warning in &warnings {
                    println!("warning: {warning}");
                }
                println!(
                    "{}: {} warning(s); values will be clamped",
                    path.display(),
                    warnings.len()
                );
            }
        }

        TuningAction::Path => {
            println!("{}", default_tuning_path().display());
        }
    }

    Ok(())
}
