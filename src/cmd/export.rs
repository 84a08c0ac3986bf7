//! Export command - tax evaluation and ledger summary as a checksummed packet

use crate::cmd::{read_bases, read_entries};
use clap::Args;
use fisc::export::ExportPacket;
use fisc::ledger::LedgerSummary;
use fisc::store::validate_workspace_id;
use fisc::tax::evaluate_tax_bases;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Workspace the packet is produced for
    #[arg(short, long)]
    workspace: String,

    /// JSON file with tax bases
    #[arg(short, long)]
    bases: PathBuf,

    /// Entries file (CSV or JSON)
    #[arg(short, long)]
    entries: PathBuf,

    /// Date stamped on the packet (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<chrono::NaiveDate>,
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        validate_workspace_id(&self.workspace)?;
        let bases = read_bases(&self.bases)?;
        let entries = read_entries(&self.entries)?;

        let foreign = entries
            .iter()
            .filter(|e| e.workspace_id != self.workspace)
            .count();
        if foreign > 0 {
            log::warn!(
                "{} entries belong to another workspace than {}",
                foreign,
                self.workspace
            );
        }

        let evaluation = evaluate_tax_bases(&bases)?;
        let ledger = LedgerSummary::from_entries(&entries)?;
        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let packet = ExportPacket::new(&self.workspace, date, evaluation, ledger)?;
        println!("{}", serde_json::to_string_pretty(&packet)?);
        Ok(())
    }
}
