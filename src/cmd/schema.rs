//! Schema command - print expected input formats

use clap::Args;
use fisc::ledger::{EntriesInput, EntryRecord};
use fisc::tax::TaxBases;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which input format to describe
    #[arg(value_enum, default_value = "bases-json")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for tax bases
    BasesJson,
    /// JSON Schema for accounting entries
    EntriesJson,
    /// CSV header row for accounting entries
    EntriesCsvHeader,
    /// CSV column descriptions for accounting entries
    EntriesCsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::BasesJson => {
                let schema = schema_for!(TaxBases);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::EntriesJson => {
                let schema = schema_for!(EntriesInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::EntriesCsvHeader => {
                println!("{}", EntryRecord::csv_header().join(","));
            }
            SchemaFormat::EntriesCsvFields => self.print_csv_fields(),
        }
        Ok(())
    }

    fn print_csv_fields(&self) {
        println!("Entries CSV Format");
        println!("==================");
        println!();
        for field in EntryRecord::csv_schema() {
            let req = if field.required { "required" } else { "optional" };
            println!("{:12} ({:8})  {}", field.name, req, field.description);
        }
        println!();
        println!("Each entry posts its amount to the debit account and the credit account.");
    }
}
