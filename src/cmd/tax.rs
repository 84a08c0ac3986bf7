//! Tax command - evaluate every applicable tax for a set of bases

use crate::cmd::read_bases;
use anyhow::Context;
use clap::Args;
use fisc::core::{format_amount, format_rate};
use fisc::store::{BasesStore, JsonDirStore};
use fisc::tax::{evaluate_tax_bases, TaxBases, TaxEvaluation};
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// JSON file with tax bases ("-" for stdin)
    #[arg(short, long, conflicts_with = "workspace")]
    bases: Option<PathBuf>,

    /// Workspace whose stored bases are evaluated
    #[arg(short, long, requires = "store")]
    workspace: Option<String>,

    /// Directory of stored bases
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the tax table output
#[derive(Debug, Clone, Tabled)]
struct TaxRow {
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let bases = self.load_bases()?;
        let evaluation = evaluate_tax_bases(&bases)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        } else {
            print_table(&evaluation)?;
        }
        Ok(())
    }

    fn load_bases(&self) -> anyhow::Result<TaxBases> {
        match (&self.bases, &self.workspace, &self.store) {
            (Some(path), _, _) => read_bases(path),
            (None, Some(workspace), Some(dir)) => {
                let store = JsonDirStore::new(dir);
                let bases = store
                    .load(workspace)?
                    .with_context(|| format!("no bases stored for workspace {workspace}"))?;
                log::info!("Loaded bases for workspace {}", workspace);
                Ok(bases)
            }
            _ => anyhow::bail!("provide --bases or --workspace with --store"),
        }
    }
}

fn build_rows(evaluation: &TaxEvaluation) -> Vec<TaxRow> {
    let mut rows = Vec::new();

    if let Some(tva) = &evaluation.tva {
        let notes = if tva.credit.is_zero() {
            String::new()
        } else {
            format!("credit {}", format_amount(tva.credit))
        };
        rows.push(TaxRow {
            tax: "TVA".to_string(),
            base: format_amount(tva.net),
            rate: tva.details.get("rate").map_or(String::new(), |r| format_rate(*r)),
            due: format_amount(tva.amount),
            notes,
        });
    }

    if let Some(css) = &evaluation.css {
        rows.push(TaxRow {
            tax: "CSS".to_string(),
            base: format_amount(css.taxable),
            rate: format_rate(css.rate),
            due: format_amount(css.amount),
            notes: String::new(),
        });
    }

    if let Some(corporate) = &evaluation.is_vs_imf {
        rows.push(TaxRow {
            tax: format!("IS/IMF ({})", corporate.applied),
            base: String::new(),
            rate: String::new(),
            due: format_amount(corporate.amount),
            notes: format!(
                "IS {}, IMF {}",
                format_amount(corporate.is_amount),
                format_amount(corporate.imf_amount)
            ),
        });
    }

    if let Some(irpp) = &evaluation.irpp {
        rows.push(TaxRow {
            tax: "IRPP".to_string(),
            base: format_amount(irpp.taxable_per_part),
            rate: String::new(),
            due: format_amount(irpp.amount),
            notes: format!("{} part(s)", irpp.parts.normalize()),
        });
    }

    rows
}

fn print_table(evaluation: &TaxEvaluation) -> anyhow::Result<()> {
    if evaluation.is_empty() {
        println!("No applicable taxes");
        return Ok(());
    }

    let rows = build_rows(evaluation);
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()))
        .to_string();
    println!();
    println!("{}", table);
    println!();
    println!("TOTAL DUE: {}", format_amount(evaluation.total_due()?));
    Ok(())
}
