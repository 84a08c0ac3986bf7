pub mod bases;
pub mod export;
pub mod ledger;
pub mod schema;
pub mod tax;

use anyhow::Context;
use fisc::ledger::{read_entries_csv, read_entries_json, AccountingEntry};
use fisc::tax::TaxBases;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read the whole input (or stdin with "-")
fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if path.as_os_str() == "-" {
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
    } else {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        BufReader::new(file).read_to_end(&mut buffer)?;
    }
    Ok(buffer)
}

/// Read tax bases JSON from a file (or stdin with "-")
pub fn read_bases(path: &Path) -> anyhow::Result<TaxBases> {
    let buffer = read_input(path)?;
    let bases = serde_json::from_slice(&buffer)
        .with_context(|| format!("invalid tax bases in {}", path.display()))?;
    Ok(bases)
}

/// Read accounting entries as JSON or CSV (or stdin with "-").
///
/// JSON is detected from a `.json` extension or a leading `{`.
pub fn read_entries(path: &Path) -> anyhow::Result<Vec<AccountingEntry>> {
    let buffer = read_input(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json")
        || buffer
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'{');
    if is_json {
        read_entries_json(buffer.as_slice())
    } else {
        read_entries_csv(buffer.as_slice())
    }
}
