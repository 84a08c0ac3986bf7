//! Ledger command - account balances and balance sheet sections

use crate::cmd::read_entries;
use clap::Args;
use fisc::core::format_amount;
use fisc::ledger::{BalanceSheetSection, LedgerAccountBalance, LedgerSummary};
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct LedgerCommand {
    /// Entries file (CSV or JSON). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Also show the balance sheet sections
    #[arg(long)]
    sheet: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the balances table output
#[derive(Debug, Clone, Tabled)]
struct BalanceRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Credit")]
    credit: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl From<&LedgerAccountBalance> for BalanceRow {
    fn from(b: &LedgerAccountBalance) -> Self {
        BalanceRow {
            account: b.account.clone(),
            label: b.label.clone(),
            debit: format_amount(b.debit),
            credit: format_amount(b.credit),
            balance: format_amount(b.balance),
        }
    }
}

impl LedgerCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let entries = read_entries(&self.file)?;
        let summary = LedgerSummary::from_entries(&entries)?;

        if self.json {
            if self.sheet {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&summary.balances)?);
            }
            return Ok(());
        }

        self.print_balances(&summary)?;
        if self.sheet {
            for section in &summary.sections {
                print_section(section);
            }
            let excluded = summary.uncategorized().count();
            if excluded > 0 {
                println!("{} account(s) outside classes 1-7 not shown", excluded);
            }
        }
        Ok(())
    }

    fn print_balances(&self, summary: &LedgerSummary) -> anyhow::Result<()> {
        if summary.balances.is_empty() {
            println!("No entries");
            return Ok(());
        }

        let (debit, credit) = summary.trial_balance()?;
        let mut rows: Vec<BalanceRow> = summary.balances.iter().map(Into::into).collect();
        rows.push(BalanceRow {
            account: "TOTAL".to_string(),
            label: String::new(),
            debit: format_amount(debit),
            credit: format_amount(credit),
            balance: format_amount(debit - credit),
        });

        println!();
        println!("ACCOUNT BALANCES");
        println!("{}", render(&rows));
        Ok(())
    }
}

fn print_section(section: &BalanceSheetSection) {
    println!();
    println!("{} ({})", section.title.to_uppercase(), format_amount(section.total));
    if section.accounts.is_empty() {
        println!("  (none)");
        return;
    }
    let rows: Vec<BalanceRow> = section.accounts.iter().map(Into::into).collect();
    println!("{}", render(&rows));
}

fn render(rows: &[BalanceRow]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string()
}
