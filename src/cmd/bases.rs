//! Bases command - save and show tax bases stored per workspace

use crate::cmd::read_bases;
use anyhow::Context;
use clap::{Args, Subcommand};
use fisc::store::{BasesStore, JsonDirStore};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum BasesCommand {
    /// Store tax bases for a workspace
    Save(SaveArgs),
    /// Print the stored tax bases of a workspace
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Workspace identifier (letters, digits, '-' and '_')
    #[arg(short, long)]
    workspace: String,

    /// Directory of stored bases
    #[arg(short, long)]
    store: PathBuf,

    /// JSON file with tax bases ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    bases: PathBuf,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(short, long)]
    workspace: String,

    #[arg(short, long)]
    store: PathBuf,
}

impl BasesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self {
            BasesCommand::Save(args) => {
                let bases = read_bases(&args.bases)?;
                JsonDirStore::new(&args.store).save(&args.workspace, &bases)?;
                log::info!("Saved bases for workspace {}", args.workspace);
                Ok(())
            }
            BasesCommand::Show(args) => {
                let bases = JsonDirStore::new(&args.store)
                    .load(&args.workspace)?
                    .with_context(|| {
                        format!("no bases stored for workspace {}", args.workspace)
                    })?;
                println!("{}", serde_json::to_string_pretty(&bases)?);
                Ok(())
            }
        }
    }
}
